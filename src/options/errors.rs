//! Error types for options validation.
//!
//! Every failure halts the pipeline in one [`ValidationStage`] and is reported
//! as a single [`OptionsError`]. There is no partial success: a caller either
//! gets a fully resolved record or exactly one error.
//!
//! # Error codes
//!
//! Each kind has a stable code (`OPTIONS_0001` ..) for tooling that wants to
//! match on failures without parsing messages:
//!
//! | Code           | Kind                  | Stage    |
//! |----------------|-----------------------|----------|
//! | `OPTIONS_0001` | `InvalidShape`        | shape    |
//! | `OPTIONS_0002` | `MissingRequired`     | required |
//! | `OPTIONS_0003` | `ConflictingRequired` | required |
//! | `OPTIONS_0004` | `UnknownOptions`      | known    |
//! | `OPTIONS_0005` | `InvalidValue`        | values   |
//! | `OPTIONS_0006` | `Corrupted`           | build    |

use crate::term::{Atom, Keyword, Term};
use thiserror::Error;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValidationStage {
    Shape,
    Required,
    Known,
    Values,
    Build,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Input is not a list of `(atom, value)` pairs.
    #[error("expected options to be a keyword list, got: {value}")]
    InvalidShape { value: Term },

    #[error("either :implementation or :otp_app must be given")]
    MissingRequired,

    #[error("only one of :implementation or :otp_app may be given, got both")]
    ConflictingRequired,

    /// Every unrecognised pair, in input order.
    #[error("unknown options given: {options}")]
    UnknownOptions { options: Keyword },

    /// First pair whose value does not satisfy its type rule.
    #[error("invalid value for {name}: expected {expected}, got: {value}")]
    InvalidValue {
        name: Atom,
        value: Term,
        expected: String,
    },

    /// Merged options broke an invariant the earlier stages guarantee.
    #[error("cannot build options, {field} {reason}")]
    Corrupted { field: String, reason: String },
}

impl OptionsError {
    pub fn invalid_shape(value: &Term) -> Self {
        Self::InvalidShape {
            value: value.clone(),
        }
    }

    pub fn invalid_value(name: &Atom, value: &Term, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.clone(),
            value: value.clone(),
            expected: expected.into(),
        }
    }

    pub fn corrupted(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Names of the unknown options, in input order. Empty for other kinds.
    pub fn unknown_names(&self) -> Vec<&Atom> {
        match self {
            Self::UnknownOptions { options } => options.keys().collect(),
            _ => Vec::new(),
        }
    }

    pub fn stage(&self) -> ValidationStage {
        match self {
            Self::InvalidShape { .. } => ValidationStage::Shape,
            Self::MissingRequired | Self::ConflictingRequired => ValidationStage::Required,
            Self::UnknownOptions { .. } => ValidationStage::Known,
            Self::InvalidValue { .. } => ValidationStage::Values,
            Self::Corrupted { .. } => ValidationStage::Build,
        }
    }

    pub fn error_code(&self) -> String {
        let code = match self {
            Self::InvalidShape { .. } => 1,
            Self::MissingRequired => 2,
            Self::ConflictingRequired => 3,
            Self::UnknownOptions { .. } => 4,
            Self::InvalidValue { .. } => 5,
            Self::Corrupted { .. } => 6,
        };
        format!("OPTIONS_{:04}", code)
    }
}

pub type OptionsResult<T> = Result<T, OptionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_messages_are_distinct() {
        let missing = OptionsError::MissingRequired.to_string();
        let conflicting = OptionsError::ConflictingRequired.to_string();

        assert_eq!(missing, "either :implementation or :otp_app must be given");
        assert_eq!(
            conflicting,
            "only one of :implementation or :otp_app may be given, got both"
        );
        assert_ne!(missing, conflicting);
    }

    #[test]
    fn test_invalid_value_message() {
        let error =
            OptionsError::invalid_value(&Atom::new("otp_app"), &Term::str("knigge"), "atom");
        assert_eq!(
            error.to_string(),
            "invalid value for :otp_app: expected atom, got: \"knigge\""
        );
        assert_eq!(error.stage(), ValidationStage::Values);
        assert_eq!(error.error_code(), "OPTIONS_0005");
    }

    #[test]
    fn test_unknown_options_message_and_names() {
        let error = OptionsError::UnknownOptions {
            options: Keyword::new()
                .with("the_answer", Term::Int(42))
                .with("another", Term::Int(1337)),
        };

        assert_eq!(
            error.to_string(),
            "unknown options given: [the_answer: 42, another: 1337]"
        );
        assert_eq!(
            error.unknown_names(),
            vec![&Atom::new("the_answer"), &Atom::new("another")]
        );
        assert_eq!(error.stage().to_string(), "known");
    }

    #[test]
    fn test_invalid_shape_renders_value() {
        let error = OptionsError::invalid_shape(&Term::List(vec![Term::Int(1), Term::Int(2)]));
        assert_eq!(
            error.to_string(),
            "expected options to be a keyword list, got: [1, 2]"
        );
        assert_eq!(error.error_code(), "OPTIONS_0001");
    }
}
