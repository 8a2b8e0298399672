//! Value model for raw options.
//!
//! Options arrive as dynamically-typed values. [`Term`] is the closed set of
//! shapes a value can take, and [`Keyword`] is the typed view of a list made
//! only of `(atom, value)` pairs.
//!
//! Terms render through [`std::fmt::Display`] in the same literal syntax the
//! [`crate::literal`] parser reads, so error messages show values exactly as
//! they were written:
//!
//! ```text
//! [otp_app: :knigge, do_not_delegate: [my_fun: 2]]
//! {:config, :my_app, MyApp.Service}
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// A symbolic identifier.
///
/// Module references are atoms too: an atom whose text starts with an
/// uppercase letter (`MyApp.Service`) names a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Atom(String);

impl Atom {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the atom is written as a module alias (`MyApp.Service`).
    pub fn is_alias(&self) -> bool {
        self.0.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Atom {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_alias() {
            write!(f, "{}", self.0)
        } else if is_plain_atom(&self.0) {
            write!(f, ":{}", self.0)
        } else {
            write!(f, ":{}", quote(&self.0))
        }
    }
}

/// Atom text that needs no quoting after the leading colon.
fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars().peekable();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    while let Some(c) = chars.next() {
        if c.is_ascii_alphanumeric() || c == '_' {
            continue;
        }
        // `?` and `!` are only allowed as the final character
        if (c == '?' || c == '!') && chars.peek().is_none() {
            continue;
        }
        return false;
    }
    true
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A raw option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Nil,
    Bool(bool),
    Atom(Atom),
    Int(i64),
    Str(String),
    List(Vec<Term>),
    Tuple(Vec<Term>),
    Map(Vec<(Term, Term)>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(Atom::new(name))
    }

    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Builds the two-element tuple a keyword list is made of.
    pub fn pair(key: impl Into<Atom>, value: Term) -> Self {
        Self::Tuple(vec![Self::Atom(key.into()), value])
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Returns true if the term is a list of `(atom, value)` pairs.
    pub fn is_keyword(&self) -> bool {
        Keyword::from_term(self).is_some()
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Keyword> for Term {
    fn from(keyword: Keyword) -> Self {
        Self::List(
            keyword
                .0
                .into_iter()
                .map(|(key, value)| Term::pair(key, value))
                .collect(),
        )
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Atom(atom) => write!(f, "{}", atom),
            Self::Int(value) => write!(f, "{}", value),
            Self::Str(text) => write!(f, "{}", quote(text)),
            Self::List(items) => match Keyword::from_items(items) {
                Some(keyword) if !items.is_empty() => write!(f, "{}", keyword),
                _ => {
                    write!(f, "[")?;
                    write_separated(f, items)?;
                    write!(f, "]")
                }
            },
            Self::Tuple(items) => {
                write!(f, "{{")?;
                write_separated(f, items)?;
                write!(f, "}}")
            }
            Self::Map(entries) => {
                write!(f, "%{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} => {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            // atoms, strings and containers serialize as their literal text
            other => serializer.collect_str(other),
        }
    }
}

/// An ordered list of `(atom, value)` pairs.
///
/// Keys may repeat. Every read treats the list as a mapping where the last
/// entry for a key wins, while iteration keeps every pair in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Keyword(Vec<(Atom, Term)>);

impl Keyword {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Views a term as a keyword list, if it has that shape.
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::List(items) => Self::from_items(items),
            _ => None,
        }
    }

    fn from_items(items: &[Term]) -> Option<Self> {
        items
            .iter()
            .map(|item| match item {
                Term::Tuple(pair) if pair.len() == 2 => {
                    pair[0].as_atom().map(|key| (key.clone(), pair[1].clone()))
                }
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    pub fn push(&mut self, key: impl Into<Atom>, value: Term) {
        self.0.push((key.into(), value));
    }

    /// Builder form of [`Keyword::push`].
    pub fn with(mut self, key: impl Into<Atom>, value: Term) -> Self {
        self.push(key, value);
        self
    }

    /// Value of the last entry for `key`.
    pub fn get(&self, key: &str) -> Option<&Term> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Atom> {
        self.0.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Atom, Term)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Atom, Term)> for Keyword {
    fn from_iter<I: IntoIterator<Item = (Atom, Term)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Keyword {
    type Item = (Atom, Term);
    type IntoIter = std::vec::IntoIter<(Atom, Term)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            // keyword sugar drops the leading colon of the key
            let key = key.to_string();
            let key = key.strip_prefix(':').unwrap_or(&key);
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "]")
    }
}

impl Serialize for Keyword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}
