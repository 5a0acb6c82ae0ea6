//! Error kind enumeration for categorizing SDK errors.

use serde::{Deserialize, Serialize};

/// Categorization of SDK errors.
///
/// Every failure the SDK reports carries exactly one `ErrorKind`. Callers
/// select a recovery strategy by matching on the kind rather than inspecting
/// a status code:
///
/// | ErrorKind        | Name                  | Retriable | Action                          |
/// |------------------|-----------------------|-----------|---------------------------------|
/// | `ReshADX`        | `ReshADXError`        | No        | Catch-all, inspect the message  |
/// | `Validation`     | `ValidationError`     | No        | Fix input (see `Error::field`)  |
/// | `Authentication` | `AuthenticationError` | No        | Fix or refresh credentials      |
/// | `NotFound`       | `NotFoundError`       | No        | Resource doesn't exist          |
/// | `RateLimit`      | `RateLimitError`      | Yes       | Wait for `Error::retry_after`   |
/// | `Server`         | `ServerError`         | Yes       | Retry with backoff              |
///
/// The set is closed at six kinds for this release. New kinds may be added
/// in later releases, hence `#[non_exhaustive]`; existing kinds are never
/// removed or renamed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Base kind, the root of the taxonomy.
    ///
    /// Used for SDK-originated failures that fit no other kind. Prefer
    /// raising a specific kind whenever the condition is known.
    #[error("reshadx error")]
    #[serde(rename = "reshadx")]
    ReshADX,

    /// Caller-supplied input failed validation.
    ///
    /// HTTP: 400 Bad Request, 422 Unprocessable Entity
    #[error("validation error")]
    Validation,

    /// Credentials are missing, invalid, or expired.
    ///
    /// HTTP: 401 Unauthorized, 403 Forbidden
    #[error("authentication error")]
    Authentication,

    /// The referenced remote resource does not exist.
    ///
    /// HTTP: 404 Not Found, 410 Gone
    #[error("not found")]
    NotFound,

    /// The caller exceeded the allowed request rate.
    ///
    /// HTTP: 429 Too Many Requests
    ///
    /// **Retriable.** Use `Error::retry_after()` for the recommended delay.
    #[error("rate limited")]
    RateLimit,

    /// The remote service failed independent of caller input.
    ///
    /// HTTP: 5xx
    ///
    /// **Retriable.** Retry with exponential backoff.
    #[error("server error")]
    Server,
}

impl ErrorKind {
    /// Every kind in the taxonomy, base kind first.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::ReshADX,
        ErrorKind::Validation,
        ErrorKind::Authentication,
        ErrorKind::NotFound,
        ErrorKind::RateLimit,
        ErrorKind::Server,
    ];

    /// Returns the stable public name of this kind.
    ///
    /// These names are part of the SDK contract and are shared with the
    /// other ReshADX SDKs.
    ///
    /// ```rust
    /// use reshadx::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::RateLimit.name(), "RateLimitError");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorKind::ReshADX => "ReshADXError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::RateLimit => "RateLimitError",
            ErrorKind::Server => "ServerError",
        }
    }

    /// Looks a kind up by its public name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns `true` for the base (catch-all) kind.
    #[inline]
    pub fn is_base(&self) -> bool {
        matches!(self, ErrorKind::ReshADX)
    }

    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// ```rust
    /// use reshadx::ErrorKind;
    ///
    /// assert!(ErrorKind::RateLimit.is_retriable());
    /// assert!(!ErrorKind::Validation.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorKind::RateLimit | ErrorKind::Server)
    }

    /// Returns the message used when an error is built from the kind alone.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::ReshADX => "an error occurred",
            ErrorKind::Validation => "request validation failed",
            ErrorKind::Authentication => "authentication failed",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::RateLimit => "rate limit exceeded",
            ErrorKind::Server => "internal server error",
        }
    }

    /// Returns the representative HTTP status code for this kind.
    ///
    /// The base kind has no status of its own.
    #[inline]
    pub fn http_status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::ReshADX => None,
            ErrorKind::Validation => Some(400),
            ErrorKind::Authentication => Some(401),
            ErrorKind::NotFound => Some(404),
            ErrorKind::RateLimit => Some(429),
            ErrorKind::Server => Some(500),
        }
    }

    /// Classifies an HTTP status code.
    ///
    /// Returns `None` for statuses that do not determine a kind on their
    /// own (2xx, 3xx, and 4xx codes outside the mapped set).
    pub fn from_http_status(status: u16) -> Option<Self> {
        match status {
            400 | 422 => Some(ErrorKind::Validation),
            401 | 403 => Some(ErrorKind::Authentication),
            404 | 410 => Some(ErrorKind::NotFound),
            429 => Some(ErrorKind::RateLimit),
            500..=599 => Some(ErrorKind::Server),
            _ => None,
        }
    }
}
