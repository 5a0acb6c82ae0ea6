//! Classification configuration for failed API responses.

use std::time::Duration;

use url::Url;

/// Base URL of the ReshADX error reference.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.reshadx.com/errors";

/// Configuration for turning failed API responses into SDK errors.
///
/// ## Default Values
///
/// - `default_retry_after`: 1s
/// - `max_retry_after`: 5m
/// - `docs_base_url`: `https://docs.reshadx.com/errors`
///
/// ## Example
///
/// ```rust
/// use reshadx::ClassificationConfig;
/// use std::time::Duration;
///
/// let config = ClassificationConfig::builder()
///     .default_retry_after(Duration::from_secs(2))
///     .max_retry_after(Duration::from_secs(60))
///     .build();
///
/// assert_eq!(config.clamp_retry_after(Duration::from_secs(600)), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ClassificationConfig {
    /// Delay attached to rate limit errors that carry no usable `Retry-After`.
    ///
    /// Capped at `max_retry_after` like any server-provided value.
    #[builder(default = Duration::from_secs(1))]
    pub default_retry_after: Duration,

    /// Upper bound applied to server-provided `Retry-After` values.
    #[builder(default = Duration::from_secs(300))]
    pub max_retry_after: Duration,

    /// Base URL used to derive documentation links from error codes.
    #[builder(into, default = DEFAULT_DOCS_BASE_URL.to_string())]
    pub docs_base_url: String,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClassificationConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps a server-provided delay at `max_retry_after`.
    pub fn clamp_retry_after(&self, delay: Duration) -> Duration {
        delay.min(self.max_retry_after)
    }

    /// Builds the documentation link for an error code.
    ///
    /// The code is lowercased and percent-encoded as one path segment.
    /// Returns `None` when the code is empty or the base URL is invalid.
    ///
    /// ```rust
    /// use reshadx::ClassificationConfig;
    ///
    /// let url = ClassificationConfig::default()
    ///     .documentation_url("RATE_LIMIT_EXCEEDED")
    ///     .unwrap();
    /// assert_eq!(url.as_str(), "https://docs.reshadx.com/errors/rate_limit_exceeded");
    /// ```
    pub fn documentation_url(&self, error_code: &str) -> Option<Url> {
        let code = error_code.trim();
        if code.is_empty() {
            return None;
        }
        let segment = urlencoding::encode(&code.to_lowercase()).into_owned();
        let base = self.docs_base_url.trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, segment)).ok()
    }
}
