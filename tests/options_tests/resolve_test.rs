//! Resolving config placeholders through a provider.

use knigge::{
    literal,
    options::{self, ConfigProvider, ResolveError, StaticConfig},
    term::{Atom, Term},
};

/// Answers every key of one application with the same module.
struct SingleApp {
    otp_app: Atom,
    module: Atom,
}

impl ConfigProvider for SingleApp {
    fn lookup(&self, otp_app: &Atom, _key: &Atom) -> Option<Term> {
        (otp_app == &self.otp_app).then(|| Term::Atom(self.module.clone()))
    }
}

#[test]
fn test_placeholder_resolves_with_consumer_key() {
    let raw = literal::parse_options("otp_app: :my_app").unwrap();
    let resolved = options::new(&raw, &Atom::new("MyApp.Delegate")).unwrap();

    let config = StaticConfig::new().with("my_app", "MyApp.Delegate", Term::atom("MyApp.Impl"));

    assert_eq!(
        resolved.implementation().resolve(&config),
        Ok(Atom::new("MyApp.Impl"))
    );
}

#[test]
fn test_custom_provider() {
    let raw = literal::parse_options("otp_app: :my_app, config_key: :anything").unwrap();
    let resolved = options::new(&raw, &Atom::new("MyApp.Delegate")).unwrap();

    let provider = SingleApp {
        otp_app: Atom::new("my_app"),
        module: Atom::new("MyApp.Impl"),
    };

    assert_eq!(
        resolved.implementation().resolve(&provider),
        Ok(Atom::new("MyApp.Impl"))
    );
}

#[test]
fn test_missing_config_entry() {
    let raw = literal::parse_options("otp_app: :my_app, config_key: :storage").unwrap();
    let resolved = options::new(&raw, &Atom::new("MyApp.Delegate")).unwrap();

    assert_eq!(
        resolved.implementation().resolve(&StaticConfig::new()),
        Err(ResolveError::NotConfigured {
            otp_app: Atom::new("my_app"),
            key: Atom::new("storage"),
        })
    );
}
