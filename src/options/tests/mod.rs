//! Tests for the options pipeline as a whole.

mod validator_proptest;
