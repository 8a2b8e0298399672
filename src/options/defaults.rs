//! Defaulting and implementation resolution.

use crate::options::schema::{self, OptionName, IMPLEMENTATION, OTP_APP};
use crate::term::{Atom, Keyword, Term};
use tracing::debug;

/// Tag of the placeholder stored under `:implementation` when the module is
/// looked up from application configuration later.
pub const CONFIG_TAG: &str = "config";

/// Merges the fixed defaults under `options` and fills in `:implementation`.
///
/// Explicit options always win: a default is only added for a key that is not
/// given at all. Defaults come first, followed by the given pairs in their
/// original order, so applying this twice yields the same list.
///
/// When `:implementation` is absent, a `{:config, otp_app, config_key}`
/// placeholder is appended. `config_key` falls back to `consumer`, the module
/// the options belong to.
#[tracing::instrument(level = "debug", skip_all, fields(consumer = %consumer))]
pub fn with_defaults(options: &Keyword, consumer: &Atom) -> Keyword {
    let mut merged: Keyword = schema::defaults()
        .into_iter()
        .filter(|(key, _)| !options.contains_key(key.as_str()))
        .collect();
    let defaulted = merged.len();
    for (key, value) in options.iter() {
        merged.push(key.clone(), value.clone());
    }

    if !merged.contains_key(IMPLEMENTATION) {
        let placeholder = config_placeholder(&merged, consumer);
        debug!(%placeholder, "implementation resolved from config");
        merged.push(IMPLEMENTATION, placeholder);
    }

    debug!(defaulted, "defaults applied");
    merged
}

fn config_placeholder(options: &Keyword, consumer: &Atom) -> Term {
    let otp_app = options.get(OTP_APP).cloned().unwrap_or(Term::Nil);
    let config_key = options
        .get(OptionName::ConfigKey.as_ref())
        .cloned()
        .unwrap_or_else(|| Term::Atom(consumer.clone()));
    Term::Tuple(vec![Term::atom(CONFIG_TAG), otp_app, config_key])
}

/// Reads `:check_if_exists?` without validating anything else.
///
/// An absent key reads as `true`. A given value is read by truthiness, so
/// `nil` turns the check off just like `false`.
pub fn check_if_exists(options: &Keyword) -> bool {
    options
        .get(OptionName::CheckIfExists.as_ref())
        .map_or(true, Term::is_truthy)
}
