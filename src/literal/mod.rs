//! # Options Literals
//!
//! Parses options written in literal syntax into [`Term`] values:
//!
//! ```text
//! [
//!   otp_app: :my_app,            # resolved from config later
//!   delegate_at: :runtime,
//!   do_not_delegate: [init: 1],
//! ]
//! ```
//!
//! Supported literals are `nil`, booleans, integers (`1_000`), strings with
//! `\"`, `\\`, `\n` and `\t` escapes, atoms (`:name`, `:"quoted name"`),
//! aliases (`MyApp.Service`), lists with keyword sugar, tuples and maps.
//!
//! Containers nest at most 32 levels deep; deeper input is a [`ParseError`].
//!
//! Parsing is purely syntactic. A map parses fine and is only rejected later,
//! when the options are validated.

mod parser;

use crate::term::Term;
use nom::error::{convert_error, VerboseError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Parse error at line {line}, column {column}: unexpected {found}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    /// Input at the failure point, truncated.
    pub found: String,
    /// Full nom trace of the failure.
    pub details: String,
}

impl ParseError {
    fn from_nom(input: &str, error: nom::Err<VerboseError<&str>>) -> Self {
        match error {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let remaining = e.errors.first().map(|(rest, _)| *rest).unwrap_or(input);
                Self::at(input, remaining, convert_error(input, e))
            }
            nom::Err::Incomplete(needed) => {
                Self::at(input, "", format!("Incomplete input, {:?}", needed))
            }
        }
    }

    fn at(input: &str, remaining: &str, details: String) -> Self {
        let offset = input.len() - remaining.len();
        let consumed = &input[..offset];
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(newline) => consumed[newline + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        let found = if remaining.is_empty() {
            "end of input".to_string()
        } else {
            format!("{:?}", remaining.chars().take(20).collect::<String>())
        };
        Self {
            line,
            column,
            found,
            details,
        }
    }
}

/// Parses a single term.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    parser::parse_term_complete(input)
        .map(|(_, term)| term)
        .map_err(|e| ParseError::from_nom(input, e))
}

/// Parses options, with or without the surrounding brackets.
///
/// `otp_app: :my_app, warn: false` and `[otp_app: :my_app, warn: false]`
/// give the same keyword list.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_options(input: &str) -> Result<Term, ParseError> {
    if parser::starts_with_keyword_key(input) {
        parser::parse_bare_keyword_complete(input)
            .map(|(_, term)| term)
            .map_err(|e| ParseError::from_nom(input, e))
    } else {
        parse_term(input)
    }
}
