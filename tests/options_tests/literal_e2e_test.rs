//! End-to-end tests from options text to the resolved record.

use knigge::{
    literal,
    options::{self, DelegateAt, Implementation, OptionsError, ValidationStage},
    term::{Atom, Keyword, Term},
    Error,
};
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> Result<options::ResolvedOptions, Error> {
    let raw = literal::parse_options(source)?;
    Ok(options::new(&raw, &Atom::new("MyApp.Delegate"))?)
}

#[test]
fn test_unknown_options_from_literal() {
    let error = resolve("[otp_app: :knigge, the_answer: 42, another: 1337]").unwrap_err();

    match error {
        Error::Options(OptionsError::UnknownOptions { options }) => {
            assert_eq!(
                options,
                Keyword::new()
                    .with("the_answer", Term::Int(42))
                    .with("another", Term::Int(1337))
            );
        }
        other => panic!("Expected unknown options, got: {:?}", other),
    }
}

#[test]
fn test_string_otp_app_from_literal() {
    let error = resolve("[otp_app: \"knigge\"]").unwrap_err();

    assert_eq!(
        error.to_string(),
        "Options error: invalid value for :otp_app: expected atom, got: \"knigge\""
    );
    assert_eq!(error.error_code().as_deref(), Some("OPTIONS_0005"));
}

#[test]
fn test_full_options_from_literal() {
    let source = r#"
        # delegate to whatever :my_app configures
        otp_app: :my_app,
        config_key: :storage,
        behaviour: MyApp.Storage,
        delegate_at: :runtime,
        do_not_delegate: [child_spec: 1],
        warn: false,
        check_if_exists?: false
    "#;

    let resolved = resolve(source).unwrap();

    assert_eq!(
        resolved.implementation(),
        &Implementation::Config {
            otp_app: Atom::new("my_app"),
            config_key: Atom::new("storage"),
        }
    );
    assert_eq!(resolved.behaviour(), Some(&Atom::new("MyApp.Storage")));
    assert_eq!(resolved.delegate_at(), DelegateAt::Runtime);
    assert!(!resolved.is_delegated("child_spec", 1));
    assert!(!resolved.warn());
    assert!(!resolved.check_if_exists());
}

#[test]
fn test_shape_errors_from_literal() {
    for source in ["%{otp_app: :knigge}", "[1, 2, 3]", ":knigge", "\"otp_app\""] {
        match resolve(source) {
            Err(Error::Options(error)) => assert_eq!(error.stage(), ValidationStage::Shape),
            other => panic!("Expected a shape error for {}, got: {:?}", source, other),
        }
    }
}

#[test]
fn test_required_errors_from_literal() {
    assert!(matches!(
        resolve("[]"),
        Err(Error::Options(OptionsError::MissingRequired))
    ));
    assert!(matches!(
        resolve("implementation: MyApp.Impl, otp_app: :my_app"),
        Err(Error::Options(OptionsError::ConflictingRequired))
    ));
    assert!(matches!(
        resolve("implementation: nil"),
        Err(Error::Options(OptionsError::InvalidValue { .. }))
    ));
}

#[test]
fn test_syntax_errors_are_parse_errors() {
    assert!(matches!(resolve("[otp_app: "), Err(Error::Parse(_))));
}

#[test]
fn test_record_serializes_to_json() {
    let resolved = resolve("implementation: MyApp.Impl, do_not_delegate: [init: 1]").unwrap();

    let json = serde_json::to_value(&resolved).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "implementation": { "module": "MyApp.Impl" },
            "behaviour": null,
            "delegate_at": "compile_time",
            "do_not_delegate": [["init", 1]],
            "warn": true,
            "config_key": null,
            "check_if_exists?": true
        })
    );
}
