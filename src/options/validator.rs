//! Validation stages for raw options.
//!
//! The stages run in a fixed order and the first failing stage halts the
//! pipeline:
//!
//! 1. **Shape**: the input is a keyword list.
//! 2. **Required**: exactly one of `:implementation` and `:otp_app` is given.
//! 3. **Known**: every key is in the schema. All unknown keys are reported
//!    together, since independent typos are safe to batch.
//! 4. **Values**: every known value satisfies its type rule. Only the first
//!    offending pair is reported, a bad value can make later ones misleading.
//!
//! Stages after the shape check work on the typed [`Keyword`] view and can
//! rely on pair shape.

use crate::options::errors::{OptionsError, OptionsResult};
use crate::options::schema::{OptionName, IMPLEMENTATION, OTP_APP};
use crate::term::{Keyword, Term};
use tracing::debug;

/// Runs every validation stage and returns the input unchanged as a keyword list.
///
/// Order and repeated keys are preserved, so the result can be piped into
/// [`crate::options::with_defaults`].
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate(raw: &Term) -> OptionsResult<Keyword> {
    let options = validate_shape(raw)?;
    validate_required(&options)?;
    validate_known(&options)?;
    validate_values(&options)?;
    debug!(count = options.len(), "options validated");
    Ok(options)
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_shape(raw: &Term) -> OptionsResult<Keyword> {
    Keyword::from_term(raw).ok_or_else(|| {
        debug!(%raw, "options are not a keyword list");
        OptionsError::invalid_shape(raw)
    })
}

/// Presence is a key lookup only, `implementation: nil` counts as given.
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_required(options: &Keyword) -> OptionsResult<()> {
    match (
        options.contains_key(IMPLEMENTATION),
        options.contains_key(OTP_APP),
    ) {
        (true, true) => Err(OptionsError::ConflictingRequired),
        (false, false) => Err(OptionsError::MissingRequired),
        _ => Ok(()),
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_known(options: &Keyword) -> OptionsResult<()> {
    let unknown: Keyword = options
        .iter()
        .filter(|(key, _)| OptionName::from_atom(key).is_none())
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        debug!(count = unknown.len(), "unknown options");
        Err(OptionsError::UnknownOptions { options: unknown })
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_values(options: &Keyword) -> OptionsResult<()> {
    for (key, value) in options.iter() {
        // unknown keys were rejected by the previous stage
        let Some(name) = OptionName::from_atom(key) else {
            continue;
        };
        let option_type = name.option_type();
        if !option_type.accepts(value) {
            debug!(option = %name, %value, "invalid option value");
            return Err(OptionsError::invalid_value(
                key,
                value,
                option_type.expected(),
            ));
        }
    }
    Ok(())
}
