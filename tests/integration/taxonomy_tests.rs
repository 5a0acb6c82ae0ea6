//! Subtype, capture and distinctness properties of the error taxonomy.

use std::collections::HashSet;

use reshadx::{Error, ErrorKind, ReshADXError};

use crate::common::{failing_call, one_of_each, propagate};

/// Every kind constructs with a message and is a base error.
#[test]
fn test_every_kind_is_a_base_error() {
    for kind in ErrorKind::ALL {
        let err: ReshADXError = Error::new(kind, "message");
        assert_eq!(err.kind(), kind);
        assert_eq!(err.message(), "message");

        // usable anywhere a std error is expected
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(boxed.to_string().ends_with("message"));
    }
}

/// No kind escapes capture through the base type.
#[test]
fn test_base_capture_catches_every_kind() {
    let mut caught = Vec::new();
    for kind in ErrorKind::ALL {
        match propagate(kind) {
            Ok(_) => panic!("{} was not raised", kind.name()),
            Err(err) => caught.push(err.kind()),
        }
    }
    assert_eq!(caught, ErrorKind::ALL);
}

/// A validation error is caught by a base-kind handler with its literal message.
#[test]
fn test_validation_scenario() {
    fn handler(result: Result<(), ReshADXError>) -> Option<String> {
        result.err().map(|err| err.message().to_owned())
    }

    let err = Error::validation("field X required");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(handler(Err(err)), Some("field X required".to_owned()));
}

/// The other five kinds are pairwise distinct yet share the base type.
#[test]
fn test_remaining_kinds_are_distinct() {
    let errors: Vec<Error> = one_of_each()
        .into_iter()
        .filter(|err| err.kind() != ErrorKind::Validation)
        .collect();
    assert_eq!(errors.len(), 5);

    let kinds: HashSet<ErrorKind> = errors.iter().map(Error::kind).collect();
    assert_eq!(kinds.len(), 5);

    for (i, a) in errors.iter().enumerate() {
        for b in &errors[i + 1..] {
            assert_ne!(a.kind(), b.kind());
        }
    }
}

/// Each error carries exactly one kind.
#[test]
fn test_kinds_are_mutually_exclusive() {
    for err in one_of_each() {
        let matching = ErrorKind::ALL.iter().filter(|k| err.is(**k)).count();
        assert_eq!(matching, 1, "{} matched {} kinds", err, matching);
    }
}

/// Selective handling: a rate limit handler ignores other kinds.
#[test]
fn test_selective_recovery() {
    let mut retried = 0;
    let mut surfaced = Vec::new();

    for kind in ErrorKind::ALL {
        match failing_call(kind) {
            Err(err) if err.kind() == ErrorKind::RateLimit => retried += 1,
            Err(err) if err.kind() == ErrorKind::Validation => {
                surfaced.push(err.message().to_owned())
            }
            Err(_) | Ok(_) => {}
        }
    }

    assert_eq!(retried, 1);
    assert_eq!(surfaced, ["ValidationError raised"]);
}

/// Errors survive a trip through `anyhow` and can be recovered by downcast.
#[test]
fn test_downcast_through_anyhow() {
    fn app() -> anyhow::Result<u32> {
        Ok(propagate(ErrorKind::NotFound)?)
    }

    let err = app().unwrap_err();
    let sdk = err.downcast_ref::<Error>().expect("reshadx error");
    assert_eq!(sdk.kind(), ErrorKind::NotFound);
}

/// Errors can be raised from many threads without coordination.
#[test]
fn test_construct_across_threads() {
    let handles: Vec<_> = ErrorKind::ALL
        .into_iter()
        .map(|kind| std::thread::spawn(move || Error::from_kind(kind)))
        .collect();

    let kinds: Vec<ErrorKind> = handles
        .into_iter()
        .map(|h| h.join().unwrap().kind())
        .collect();
    assert_eq!(kinds, ErrorKind::ALL);
}
