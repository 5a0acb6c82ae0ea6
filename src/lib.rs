//! # ReshADX Rust SDK
//!
//! Official Rust SDK for ReshADX, the Open Banking API for Africa.
//!
//! This release provides the SDK's foundation: the version identifier and
//! the error taxonomy every resource method (accounts, transactions,
//! payments, ...) reports failures through. The client itself ships in a
//! later release.
//!
//! ## Error Handling
//!
//! ```rust
//! use reshadx::{Error, ErrorKind};
//!
//! fn create_payment(amount: i64) -> reshadx::Result<String> {
//!     if amount <= 0 {
//!         return Err(Error::validation("amount must be positive").with_field("amount"));
//!     }
//!     Ok("pmt_001".into())
//! }
//!
//! let err = create_payment(0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.field(), Some("amount"));
//! ```
//!
//! ## Key Concepts
//!
//! - **One error type**: every failure is a [`Error`] (also exported as
//!   [`ReshADXError`]), so `?` and `Result<T, reshadx::Error>` catch all of them
//! - **Six kinds**: [`ErrorKind`] selects the recovery strategy
//! - **Status is context**: an HTTP status may be attached to an error, but the
//!   kind never depends on it being present
//!
//! ## Features
//!
//! - `tracing`: Enable tracing integration
//!
//! The client entry point is not part of this release:
//!
//! ```rust,compile_fail
//! use reshadx::ReshADX;
//! ```
//!
//! ```rust,compile_fail
//! use reshadx::Client;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod version;

// Tracing support
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub mod tracing_support;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use error::{
    ApiErrorBody, ApiErrorType, Classifier, ContextValue, Error, ErrorContext, ErrorKind,
    ReshADXError, Result,
};
pub use version::{VERSION, Version, VersionError};

// Re-export config types
pub use config::ClassificationConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_reexported() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_alias_is_error() {
        let err: ReshADXError = Error::server("boom");
        assert_eq!(err.kind(), ErrorKind::Server);
    }
}
