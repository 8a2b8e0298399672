//! The fixed option schema.
//!
//! Every recognised option is a variant of [`OptionName`]; parsing an atom
//! into an `OptionName` is the allow-list check. Each name maps to exactly one
//! [`OptionType`] through a static match, and some names carry a fixed
//! default value.

use crate::term::{Atom, Keyword, Term};
use strum::IntoEnumIterator;

/// Option that holds the direct implementation module.
pub const IMPLEMENTATION: &str = "implementation";
/// Option that names the application whose configuration holds the implementation.
pub const OTP_APP: &str = "otp_app";
/// Members of the exclusive-required group, in reporting order.
pub const REQUIRED_GROUP: [&str; 2] = [IMPLEMENTATION, OTP_APP];

/// A recognised option name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum OptionName {
    Behaviour,
    #[strum(serialize = "check_if_exists?")]
    CheckIfExists,
    ConfigKey,
    DelegateAt,
    DoNotDelegate,
    Implementation,
    OtpApp,
    Warn,
}

impl OptionName {
    /// Looks up the schema entry for an atom, `None` if the atom is not allowed.
    pub fn from_atom(atom: &Atom) -> Option<Self> {
        atom.as_str().parse().ok()
    }

    pub fn to_atom(self) -> Atom {
        Atom::new(self.as_ref())
    }

    /// Type rule the option's value must satisfy.
    pub fn option_type(self) -> OptionType {
        match self {
            Self::Behaviour => OptionType::Module,
            Self::CheckIfExists => OptionType::Boolean,
            Self::ConfigKey => OptionType::Atom,
            Self::DelegateAt => OptionType::OneOf(DelegateAt::MEMBERS),
            Self::DoNotDelegate => OptionType::Keyword,
            Self::Implementation => OptionType::Module,
            Self::OtpApp => OptionType::Atom,
            Self::Warn => OptionType::Boolean,
        }
    }

    /// Fixed default merged in when the option is not given.
    pub fn default_value(self) -> Option<Term> {
        match self {
            Self::CheckIfExists => Some(Term::Bool(true)),
            Self::DelegateAt => Some(Term::atom(DelegateAt::CompileTime.as_ref())),
            Self::DoNotDelegate => Some(Term::List(Vec::new())),
            Self::Warn => Some(Term::Bool(true)),
            _ => None,
        }
    }
}

/// All defaults, in schema order.
pub fn defaults() -> Keyword {
    OptionName::iter()
        .filter_map(|name| name.default_value().map(|value| (name.to_atom(), value)))
        .collect()
}

/// Type rule of a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Atom,
    Boolean,
    Module,
    Keyword,
    OneOf(&'static [&'static str]),
}

impl OptionType {
    pub fn accepts(&self, value: &Term) -> bool {
        match self {
            // module existence is left to the delegation collaborator
            Self::Atom | Self::Module => matches!(value, Term::Atom(_)),
            Self::Boolean => matches!(value, Term::Bool(_)),
            Self::Keyword => value.is_keyword(),
            Self::OneOf(members) => value
                .as_atom()
                .is_some_and(|atom| members.contains(&atom.as_str())),
        }
    }

    /// Human-readable description used in error messages.
    pub fn expected(&self) -> String {
        match self {
            Self::Atom => "atom".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Module => "module".to_string(),
            Self::Keyword => "keyword".to_string(),
            Self::OneOf(members) => members
                .iter()
                .map(|member| Atom::new(*member).to_string())
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

/// When the delegating functions look up their implementation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DelegateAt {
    #[default]
    CompileTime,
    Runtime,
}

impl DelegateAt {
    pub const MEMBERS: &'static [&'static str] = &["compile_time", "runtime"];
}
