//! Export surface and version identifier.

use reshadx::{ErrorKind, VERSION, Version};

/// Exactly six kinds, under their published names.
#[test]
fn test_exactly_six_named_kinds() {
    let names: Vec<&str> = ErrorKind::ALL.iter().map(ErrorKind::name).collect();
    assert_eq!(
        names,
        [
            "ReshADXError",
            "ValidationError",
            "AuthenticationError",
            "NotFoundError",
            "RateLimitError",
            "ServerError",
        ]
    );
}

/// Names are stable identities: they resolve back to the same kind.
#[test]
fn test_names_resolve() {
    for kind in ErrorKind::ALL {
        assert_eq!(ErrorKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ErrorKind::from_name("ReshADX"), None);
}

/// The version constant is a well-formed semantic version triple.
#[test]
fn test_version_is_semver_triple() {
    let version: Version = VERSION.parse().expect("semver");
    assert_eq!(version.to_string(), VERSION);
    assert_eq!(Version::current().unwrap(), version);
}

/// The prelude exposes the same types as the crate root.
#[test]
fn test_prelude_matches_root() {
    use reshadx::prelude as p;

    let err: p::ReshADXError = p::Error::validation("x");
    let kind: p::ErrorKind = err.kind();
    assert_eq!(kind, reshadx::ErrorKind::Validation);
    assert_eq!(p::VERSION, VERSION);
}
