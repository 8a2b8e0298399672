//! # Knigge: delegation options
//!
//! A module that delegates its calls to an implementation module is configured
//! with a small, fixed set of options. This crate turns those raw options into
//! a validated, fully defaulted [`options::ResolvedOptions`] record, or a
//! single error explaining why it cannot.
//!
//! ## Components
//!
//! - Value model for raw options ([`term`])
//! - Validation, defaulting and resolution ([`options`])
//! - Literal syntax for writing options as text ([`literal`])
//! - Crate-level errors ([`error`])
//!
//! ## Pipeline
//!
//! ```text
//! text → literal::parse_options → Term → options::new(consumer) → ResolvedOptions
//! ```
//!
//! The implementation module is either given directly (`implementation:`) or
//! left as a placeholder to be looked up in an application's configuration
//! (`otp_app:`). Resolving the placeholder is up to the caller, through
//! [`options::ConfigProvider`].
//!
//! ```
//! use knigge::{literal, options};
//! use knigge::term::Atom;
//!
//! let raw = literal::parse_options("implementation: MyApp.Impl, warn: false").unwrap();
//! let resolved = options::new(&raw, &Atom::new("MyApp.Delegate")).unwrap();
//!
//! assert!(!resolved.warn());
//! assert!(resolved.check_if_exists());
//! ```

pub mod error;
pub mod literal;
pub mod options;
pub mod term;

// Re-exports
pub use error::*;
