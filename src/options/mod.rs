//! Delegation options: validation, defaulting and resolution.
//!
//! # Pipeline
//!
//! ```text
//! raw Term → shape → required → known → values → defaults → resolution → ResolvedOptions
//! ```
//!
//! The first failing stage ends the call with an [`OptionsError`]; no record is
//! built from invalid input. The schema and defaults are fixed tables, so the
//! whole pipeline is a pure function of its input and the consumer name.
//!
//! # Examples
//!
//! ```
//! use knigge::options::{self, Implementation};
//! use knigge::term::{Atom, Keyword, Term};
//!
//! let raw: Term = Keyword::new().with("otp_app", Term::atom("my_app")).into();
//! let resolved = options::new(&raw, &Atom::new("MyApp.Delegate")).unwrap();
//!
//! assert_eq!(
//!     resolved.implementation(),
//!     &Implementation::Config {
//!         otp_app: Atom::new("my_app"),
//!         config_key: Atom::new("MyApp.Delegate"),
//!     }
//! );
//! ```

mod defaults;
mod errors;
mod provider;
mod resolved;
mod schema;
mod validator;

#[cfg(test)]
mod tests;

pub use defaults::{check_if_exists, with_defaults, CONFIG_TAG};
pub use errors::{OptionsError, OptionsResult, ValidationStage};
pub use provider::{ConfigProvider, ResolveError, StaticConfig};
pub use resolved::{Implementation, ResolvedOptions};
pub use schema::{defaults, DelegateAt, OptionName, OptionType, REQUIRED_GROUP};
pub use validator::{validate, validate_known, validate_required, validate_shape, validate_values};

use crate::term::{Atom, Term};
use tracing::debug;

/// Validates `raw` and builds the resolved record for `consumer`.
///
/// `consumer` is the module the options belong to. It becomes the config key
/// when options are resolved through `:otp_app` without a `:config_key`.
#[tracing::instrument(level = "debug", skip_all, fields(consumer = %consumer))]
pub fn new(raw: &Term, consumer: &Atom) -> OptionsResult<ResolvedOptions> {
    let options = validate(raw)?;
    let merged = with_defaults(&options, consumer);
    let resolved = ResolvedOptions::build(&merged)?;
    debug!(implementation = ?resolved.implementation(), "options resolved");
    Ok(resolved)
}
