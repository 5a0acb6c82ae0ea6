//! Shared helpers for integration tests.

use reshadx::{Error, ErrorKind};

/// One error of every kind, each with a distinct literal message.
pub fn one_of_each() -> Vec<Error> {
    vec![
        Error::reshadx("unclassified failure"),
        Error::validation("field X required"),
        Error::authentication("access token expired"),
        Error::not_found("account acc_missing not found"),
        Error::rate_limit("too many requests"),
        Error::server("institution unavailable"),
    ]
}

/// Stands in for a resource method: fails with the requested kind.
pub fn failing_call(kind: ErrorKind) -> reshadx::Result<u32> {
    Err(Error::new(kind, format!("{} raised", kind.name())))
}

/// A caller that propagates SDK errors with `?`.
pub fn propagate(kind: ErrorKind) -> reshadx::Result<u32> {
    let value = failing_call(kind)?;
    Ok(value + 1)
}
