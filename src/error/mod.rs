//! Error types for the ReshADX SDK.
//!
//! Every SDK failure is reported as one [`Error`], carrying exactly one of
//! six [`ErrorKind`]s:
//!
//! | Kind                        | Name                  |
//! |-----------------------------|-----------------------|
//! | [`ErrorKind::ReshADX`]      | `ReshADXError`        |
//! | [`ErrorKind::Validation`]   | `ValidationError`     |
//! | [`ErrorKind::Authentication`] | `AuthenticationError` |
//! | [`ErrorKind::NotFound`]     | `NotFoundError`       |
//! | [`ErrorKind::RateLimit`]    | `RateLimitError`      |
//! | [`ErrorKind::Server`]       | `ServerError`         |
//!
//! ## Key Invariant
//!
//! Handling `Error` handles every kind. Handling one kind means matching on
//! [`Error::kind`]:
//!
//! ```rust
//! use reshadx::{Error, ErrorKind};
//!
//! fn lookup(id: &str) -> reshadx::Result<()> {
//!     Err(Error::not_found(format!("account {} not found", id)))
//! }
//!
//! match lookup("acc_123") {
//!     Err(err) if err.kind() == ErrorKind::RateLimit => { /* back off */ }
//!     Err(err) => assert_eq!(err.kind(), ErrorKind::NotFound),
//!     Ok(()) => unreachable!(),
//! }
//! ```

mod api;
mod base;
mod context;
mod kind;

pub use api::{
    ApiErrorBody, ApiErrorType, Classifier, display_message_for, kind_for_error_code,
    parse_retry_after, suggested_action_for,
};
pub use base::Error;
pub use context::{ContextValue, ErrorContext};
pub use kind::ErrorKind;

/// The base error type under its cross-SDK name.
///
/// Identical to [`Error`]; catching a `ReshADXError` catches every kind.
pub type ReshADXError = Error;

/// A specialized `Result` type for ReshADX operations.
pub type Result<T> = std::result::Result<T, Error>;
