//! Property-based tests for the options validator.

use crate::options::{self, with_defaults, OptionName, OptionsError, ValidationStage};
use crate::term::{Atom, Keyword, Term};
use proptest::prelude::*;
use strum::IntoEnumIterator;

/// Lowercase names that are never schema keys.
fn unknown_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,10}".prop_filter("must not be a schema key", |name| {
        OptionName::from_atom(&Atom::new(name.as_str())).is_none()
    })
}

/// Valid values for every optional key.
fn optional_options_strategy() -> impl Strategy<Value = Keyword> {
    (
        prop::option::of(prop::bool::ANY),
        prop::option::of(prop::sample::select(vec!["compile_time", "runtime"])),
        prop::option::of(prop::bool::ANY),
        prop::option::of(prop::collection::vec(("[a-z]{1,8}", 0i64..5), 0..3)),
    )
        .prop_map(|(warn, delegate_at, check, do_not_delegate)| {
            let mut options = Keyword::new();
            if let Some(warn) = warn {
                options.push("warn", Term::Bool(warn));
            }
            if let Some(delegate_at) = delegate_at {
                options.push("delegate_at", Term::atom(delegate_at));
            }
            if let Some(check) = check {
                options.push("check_if_exists?", Term::Bool(check));
            }
            if let Some(pairs) = do_not_delegate {
                let list = pairs
                    .into_iter()
                    .map(|(name, arity)| Term::pair(name.as_str(), Term::Int(arity)))
                    .collect();
                options.push("do_not_delegate", Term::List(list));
            }
            options
        })
}

fn consumer() -> Atom {
    Atom::new("MyApp.Delegate")
}

proptest! {
    #[test]
    fn test_required_group_outcomes(
        with_implementation in prop::bool::ANY,
        with_otp_app in prop::bool::ANY,
        optional in optional_options_strategy(),
    ) {
        let mut options = optional;
        if with_implementation {
            options.push("implementation", Term::atom("MyApp.Impl"));
        }
        if with_otp_app {
            options.push("otp_app", Term::atom("my_app"));
        }

        let result = options::validate(&options.clone().into());

        match (with_implementation, with_otp_app) {
            (true, true) => prop_assert_eq!(result, Err(OptionsError::ConflictingRequired)),
            (false, false) => prop_assert_eq!(result, Err(OptionsError::MissingRequired)),
            _ => prop_assert_eq!(result, Ok(options)),
        }
    }

    #[test]
    fn test_unknown_keys_collected_in_order(
        unknown in prop::collection::vec((unknown_name_strategy(), 0i64..100), 1..5),
        optional in optional_options_strategy(),
    ) {
        let mut options = optional.with("otp_app", Term::atom("my_app"));
        for (name, value) in &unknown {
            options.push(name.as_str(), Term::Int(*value));
        }

        let error = options::validate(&options.into()).unwrap_err();

        let expected: Vec<Atom> = unknown.iter().map(|(name, _)| Atom::new(name.as_str())).collect();
        prop_assert_eq!(error.stage(), ValidationStage::Known);
        prop_assert_eq!(error.unknown_names(), expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_delegate_at_names_both_members(name in "[a-z_]{1,12}") {
        prop_assume!(name != "compile_time" && name != "runtime");
        let options = Keyword::new()
            .with("implementation", Term::atom("MyApp.Impl"))
            .with("delegate_at", Term::atom(name.as_str()));

        let error = options::validate(&options.into()).unwrap_err();

        prop_assert_eq!(
            error,
            OptionsError::InvalidValue {
                name: Atom::new("delegate_at"),
                value: Term::atom(name.as_str()),
                expected: ":compile_time or :runtime".to_string(),
            }
        );
    }

    #[test]
    fn test_with_defaults_is_idempotent(
        optional in optional_options_strategy(),
        use_otp_app in prop::bool::ANY,
    ) {
        let options = if use_otp_app {
            optional.with("otp_app", Term::atom("my_app"))
        } else {
            optional.with("implementation", Term::atom("MyApp.Impl"))
        };

        let once = with_defaults(&options, &consumer());
        let twice = with_defaults(&once, &consumer());

        prop_assert_eq!(&once, &twice);
        for name in OptionName::iter() {
            prop_assert!(name.default_value().is_none() || once.contains_key(name.as_ref()));
        }
    }

    #[test]
    fn test_defaults_never_override(optional in optional_options_strategy()) {
        let options = optional.with("implementation", Term::atom("MyApp.Impl"));

        let merged = with_defaults(&options, &consumer());

        for (key, _) in options.iter() {
            prop_assert_eq!(merged.get(key.as_str()), options.get(key.as_str()));
        }
        prop_assert!(options::new(&options.into(), &consumer()).is_ok());
    }
}
