//! Late resolution of config placeholders.
//!
//! The validator only records where an implementation should come from. The
//! dispatch side resolves [`Implementation::Config`] through a
//! [`ConfigProvider`] at whatever point it needs the module.

use crate::options::resolved::Implementation;
use crate::term::{Atom, Term};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Application configuration lookup.
pub trait ConfigProvider {
    /// Returns the value stored under `key` for `otp_app`, if any.
    fn lookup(&self, otp_app: &Atom, key: &Atom) -> Option<Term>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no implementation configured for {key} in {otp_app}")]
    NotConfigured { otp_app: Atom, key: Atom },

    #[error("configured implementation for {key} in {otp_app} is not a module: {value}")]
    NotAModule { otp_app: Atom, key: Atom, value: Term },
}

impl Implementation {
    /// Returns the implementation module, asking `provider` for placeholders.
    pub fn resolve(&self, provider: &dyn ConfigProvider) -> Result<Atom, ResolveError> {
        match self {
            Self::Module(module) => Ok(module.clone()),
            Self::Config {
                otp_app,
                config_key,
            } => match provider.lookup(otp_app, config_key) {
                Some(Term::Atom(module)) => {
                    debug!(%otp_app, key = %config_key, %module, "implementation resolved");
                    Ok(module)
                }
                Some(value) => Err(ResolveError::NotAModule {
                    otp_app: otp_app.clone(),
                    key: config_key.clone(),
                    value,
                }),
                None => Err(ResolveError::NotConfigured {
                    otp_app: otp_app.clone(),
                    key: config_key.clone(),
                }),
            },
        }
    }
}

/// In-memory [`ConfigProvider`].
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    entries: HashMap<(Atom, Atom), Term>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, otp_app: impl Into<Atom>, key: impl Into<Atom>, value: Term) {
        self.entries.insert((otp_app.into(), key.into()), value);
    }

    pub fn with(mut self, otp_app: impl Into<Atom>, key: impl Into<Atom>, value: Term) -> Self {
        self.put(otp_app, key, value);
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn lookup(&self, otp_app: &Atom, key: &Atom) -> Option<Term> {
        self.entries.get(&(otp_app.clone(), key.clone())).cloned()
    }
}
