//! The immutable, fully resolved options record.

use crate::options::defaults::CONFIG_TAG;
use crate::options::errors::{OptionsError, OptionsResult};
use crate::options::schema::{DelegateAt, OptionName};
use crate::term::{Atom, Keyword, Term};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Where the implementation module comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Implementation {
    /// The module was given directly.
    Module(Atom),
    /// Resolve later by asking `otp_app`'s configuration for `config_key`.
    Config { otp_app: Atom, config_key: Atom },
}

impl Implementation {
    pub fn module(&self) -> Option<&Atom> {
        match self {
            Self::Module(module) => Some(module),
            Self::Config { .. } => None,
        }
    }

    /// The term stored under `:implementation`: the module, or the
    /// `{:config, otp_app, config_key}` placeholder.
    pub fn to_term(&self) -> Term {
        match self {
            Self::Module(module) => Term::Atom(module.clone()),
            Self::Config {
                otp_app,
                config_key,
            } => Term::Tuple(vec![
                Term::atom(CONFIG_TAG),
                Term::Atom(otp_app.clone()),
                Term::Atom(config_key.clone()),
            ]),
        }
    }

    fn from_term(term: &Term) -> OptionsResult<Self> {
        match term {
            Term::Atom(module) => Ok(Self::Module(module.clone())),
            Term::Tuple(items) => match items.as_slice() {
                [Term::Atom(tag), Term::Atom(otp_app), Term::Atom(config_key)]
                    if tag.as_str() == CONFIG_TAG =>
                {
                    Ok(Self::Config {
                        otp_app: otp_app.clone(),
                        config_key: config_key.clone(),
                    })
                }
                _ => Err(OptionsError::corrupted(
                    OptionName::Implementation.as_ref(),
                    format!("is not a config placeholder: {}", term),
                )),
            },
            other => Err(OptionsError::corrupted(
                OptionName::Implementation.as_ref(),
                format!("is neither a module nor a placeholder: {}", other),
            )),
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

/// Validated options with every default applied.
///
/// Built once by [`crate::options::new`] and read-only afterwards: fields are
/// private and only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    implementation: Implementation,
    behaviour: Option<Atom>,
    delegate_at: DelegateAt,
    do_not_delegate: Keyword,
    warn: bool,
    config_key: Option<Atom>,
    #[serde(rename = "check_if_exists?")]
    check_if_exists: bool,
}

impl ResolvedOptions {
    /// Projects merged options onto the record.
    ///
    /// No validation happens here. An error means an earlier stage let
    /// something through it should not have.
    pub(crate) fn build(merged: &Keyword) -> OptionsResult<Self> {
        let implementation = merged
            .get(OptionName::Implementation.as_ref())
            .ok_or_else(|| {
                OptionsError::corrupted(OptionName::Implementation.as_ref(), "is missing")
            })
            .and_then(Implementation::from_term)?;

        Ok(Self {
            implementation,
            behaviour: optional_atom(merged, OptionName::Behaviour)?,
            delegate_at: delegate_at(merged)?,
            do_not_delegate: required(merged, OptionName::DoNotDelegate, Keyword::from_term)?,
            warn: required(merged, OptionName::Warn, Term::as_bool)?,
            config_key: optional_atom(merged, OptionName::ConfigKey)?,
            check_if_exists: required(merged, OptionName::CheckIfExists, Term::as_bool)?,
        })
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    pub fn behaviour(&self) -> Option<&Atom> {
        self.behaviour.as_ref()
    }

    pub fn delegate_at(&self) -> DelegateAt {
        self.delegate_at
    }

    pub fn delegates_at_runtime(&self) -> bool {
        self.delegate_at == DelegateAt::Runtime
    }

    pub fn do_not_delegate(&self) -> &Keyword {
        &self.do_not_delegate
    }

    /// Returns false if `name/arity` is exempted through `:do_not_delegate`.
    pub fn is_delegated(&self, name: &str, arity: i64) -> bool {
        !self
            .do_not_delegate
            .iter()
            .any(|(key, value)| key.as_str() == name && *value == Term::Int(arity))
    }

    pub fn warn(&self) -> bool {
        self.warn
    }

    pub fn config_key(&self) -> Option<&Atom> {
        self.config_key.as_ref()
    }

    pub fn check_if_exists(&self) -> bool {
        self.check_if_exists
    }
}

fn required<T>(
    merged: &Keyword,
    name: OptionName,
    project: impl Fn(&Term) -> Option<T>,
) -> OptionsResult<T> {
    let value = merged
        .get(name.as_ref())
        .ok_or_else(|| OptionsError::corrupted(name.as_ref(), "is missing"))?;
    project(value).ok_or_else(|| {
        OptionsError::corrupted(name.as_ref(), format!("has unexpected value {}", value))
    })
}

fn optional_atom(merged: &Keyword, name: OptionName) -> OptionsResult<Option<Atom>> {
    match merged.get(name.as_ref()) {
        None => Ok(None),
        Some(Term::Atom(atom)) => Ok(Some(atom.clone())),
        Some(other) => Err(OptionsError::corrupted(
            name.as_ref(),
            format!("has unexpected value {}", other),
        )),
    }
}

fn delegate_at(merged: &Keyword) -> OptionsResult<DelegateAt> {
    required(merged, OptionName::DelegateAt, |term| {
        term.as_atom()
            .and_then(|atom| DelegateAt::from_str(atom.as_str()).ok())
    })
}
