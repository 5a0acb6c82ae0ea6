//! Main error type for the ReshADX SDK.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use url::Url;

use super::{ContextValue, ErrorContext, ErrorKind};

/// The single error type for ReshADX SDK operations.
///
/// Every SDK failure is an `Error`, whatever its [`ErrorKind`]. Handling
/// `Error` therefore catches every SDK-originated failure, while matching on
/// [`kind()`](Error::kind) selects a specific recovery strategy.
///
/// ## Error Hierarchy
///
/// ```text
/// Error (ReshADXError)
/// ├── kind: ErrorKind           (one of six, never more than one)
/// ├── message                   (human-readable description)
/// ├── status: Option            (HTTP status, context only)
/// ├── request_id: Option        (server-assigned correlation ID)
/// ├── error_code: Option        (server code, e.g. RATE_LIMIT_EXCEEDED)
/// ├── retry_after: Option       (rate limit delay hint)
/// ├── field: Option             (offending input field)
/// ├── display/suggested/docs    (end-user guidance from the API)
/// ├── context: ErrorContext     (open-ended extra details)
/// └── source: Option            (underlying cause)
/// ```
///
/// Errors are built with the consuming `with_*` methods and are immutable
/// once returned to the caller.
///
/// ## Example
///
/// ```rust
/// use reshadx::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::RateLimit => {
///             if let Some(delay) = err.retry_after() {
///                 println!("Rate limited, retry after {:?}", delay);
///             }
///         }
///         ErrorKind::Validation => {
///             println!("Invalid field {:?}: {}", err.field(), err.message());
///         }
///         kind if kind.is_retriable() => {
///             println!("Transient error, will retry");
///         }
///         _ => {
///             println!("Permanent error: {}", err);
///         }
///     }
///
///     if let Some(id) = err.request_id() {
///         eprintln!("Request ID: {}", id);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    request_id: Option<String>,
    error_code: Option<String>,
    retry_after: Option<Duration>,
    field: Option<String>,
    display_message: Option<String>,
    suggested_action: Option<String>,
    documentation_url: Option<Url>,
    causes: Vec<String>,
    context: ErrorContext,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reshadx::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Validation, "amount must be positive");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// assert_eq!(err.message(), "amount must be positive");
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            request_id: None,
            error_code: None,
            retry_after: None,
            field: None,
            display_message: None,
            suggested_action: None,
            documentation_url: None,
            causes: Vec::new(),
            context: ErrorContext::new(),
            source: None,
        }
    }

    /// Creates an error from a kind with its default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error has the given kind.
    #[inline]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Returns the human-readable message exactly as it was supplied.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status the failure arrived with, if any.
    ///
    /// The status is informational only; the kind never depends on it
    /// being present.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the server-assigned request ID, if available.
    ///
    /// Always include this in error logs for support correlation.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the server error code (e.g. `INVALID_ACCESS_TOKEN`), if available.
    #[inline]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Returns the recommended retry delay for rate limit errors.
    ///
    /// This is populated from the `Retry-After` header when present.
    /// Always prefer this value over a fixed delay for rate limit handling.
    #[inline]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns the name of the input field that failed validation, if known.
    #[inline]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns a message suitable for showing to an end user, if available.
    #[inline]
    pub fn display_message(&self) -> Option<&str> {
        self.display_message.as_deref()
    }

    /// Returns the action the API suggests to resolve the failure, if any.
    #[inline]
    pub fn suggested_action(&self) -> Option<&str> {
        self.suggested_action.as_deref()
    }

    /// Returns the documentation page describing this error, if known.
    #[inline]
    pub fn documentation_url(&self) -> Option<&Url> {
        self.documentation_url.as_ref()
    }

    /// Returns the individual causes reported by the API.
    #[inline]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Returns the structured context attached to this error.
    #[inline]
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Returns `true` if this error is generally safe to retry.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the request ID for this error.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the server error code.
    #[must_use]
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Sets the retry-after duration for this error.
    #[must_use]
    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Sets the offending input field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the end-user display message.
    #[must_use]
    pub fn with_display_message(mut self, message: impl Into<String>) -> Self {
        self.display_message = Some(message.into());
        self
    }

    /// Sets the suggested action.
    #[must_use]
    pub fn with_suggested_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }

    /// Sets the documentation URL.
    #[must_use]
    pub fn with_documentation_url(mut self, url: Url) -> Self {
        self.documentation_url = Some(url);
        self
    }

    /// Appends a cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Adds one context entry, overwriting any previous value for the key.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Merges a whole context into this error's context.
    #[must_use]
    pub fn with_context_map(mut self, context: ErrorContext) -> Self {
        self.context.extend(context);
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors, one per kind

    /// Creates a base-kind error.
    ///
    /// This is the catch-all kind. Prefer a specific constructor whenever
    /// the failure condition is known.
    pub fn reshadx(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ReshADX, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a rate limit error.
    ///
    /// Attach the server's delay hint with [`with_retry_after`](Error::with_retry_after).
    pub fn rate_limit(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Server, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::TimedOut => ErrorKind::Server,
            _ => ErrorKind::ReshADX,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::reshadx(format!("JSON error: {}", err)).with_source(err)
    }
}
