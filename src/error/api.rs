//! Decoding of ReshADX API error bodies and classification of failed responses.
//!
//! The API reports failures with an HTTP status and a JSON body:
//!
//! ```json
//! {
//!   "error_type": "RATE_LIMIT_EXCEEDED",
//!   "error_code": "RATE_LIMIT_EXCEEDED",
//!   "error_message": "Too many requests",
//!   "display_message": "Too many requests. Please try again in a few moments.",
//!   "request_id": "req_1718000000_ab12cd34e",
//!   "causes": [],
//!   "status": 429,
//!   "documentation_url": "https://docs.reshadx.com/errors/rate_limit_exceeded",
//!   "suggested_action": "Wait before making additional requests"
//! }
//! ```
//!
//! [`Classifier`] turns such a response into exactly one [`ErrorKind`]:
//!
//! 1. the HTTP status, when it decides a kind on its own;
//! 2. otherwise the body's `error_type`;
//! 3. otherwise the body's `error_code`;
//! 4. otherwise the base kind.
//!
//! Classification is pure: no I/O and no logging.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::{ContextValue, Error, ErrorKind};
use crate::config::ClassificationConfig;

/// Longest raw (non-JSON) body kept as an error message, in characters.
const MAX_RAW_MESSAGE_CHARS: usize = 256;

type JsonMap = serde_json::Map<String, serde_json::Value>;

/// The `error_type` field of an API error body.
///
/// Unknown values are preserved in [`ApiErrorType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiErrorType {
    /// `INVALID_REQUEST`
    InvalidRequest,
    /// `INVALID_INPUT`
    InvalidInput,
    /// `RATE_LIMIT_EXCEEDED`
    RateLimitExceeded,
    /// `API_ERROR`
    ApiError,
    /// `ITEM_ERROR`
    ItemError,
    /// `ASSET_REPORT_ERROR`
    AssetReportError,
    /// `RECAPTCHA_ERROR`
    RecaptchaError,
    /// `OAUTH_ERROR`
    OauthError,
    /// `PAYMENT_ERROR`
    PaymentError,
    /// `BANK_TRANSFER_ERROR`
    BankTransferError,
    /// Any value this SDK version does not know.
    Other(String),
}

impl ApiErrorType {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            ApiErrorType::InvalidRequest => "INVALID_REQUEST",
            ApiErrorType::InvalidInput => "INVALID_INPUT",
            ApiErrorType::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ApiErrorType::ApiError => "API_ERROR",
            ApiErrorType::ItemError => "ITEM_ERROR",
            ApiErrorType::AssetReportError => "ASSET_REPORT_ERROR",
            ApiErrorType::RecaptchaError => "RECAPTCHA_ERROR",
            ApiErrorType::OauthError => "OAUTH_ERROR",
            ApiErrorType::PaymentError => "PAYMENT_ERROR",
            ApiErrorType::BankTransferError => "BANK_TRANSFER_ERROR",
            ApiErrorType::Other(s) => s,
        }
    }

    /// Returns the kind this error type determines, if any.
    ///
    /// Product-specific types (`ITEM_ERROR`, `PAYMENT_ERROR`, ...) do not
    /// determine a kind by themselves.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiErrorType::InvalidRequest | ApiErrorType::InvalidInput => {
                Some(ErrorKind::Validation)
            }
            ApiErrorType::OauthError => Some(ErrorKind::Authentication),
            ApiErrorType::RateLimitExceeded => Some(ErrorKind::RateLimit),
            ApiErrorType::ApiError => Some(ErrorKind::Server),
            _ => None,
        }
    }
}

impl From<String> for ApiErrorType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "INVALID_REQUEST" => ApiErrorType::InvalidRequest,
            "INVALID_INPUT" => ApiErrorType::InvalidInput,
            "RATE_LIMIT_EXCEEDED" => ApiErrorType::RateLimitExceeded,
            "API_ERROR" => ApiErrorType::ApiError,
            "ITEM_ERROR" => ApiErrorType::ItemError,
            "ASSET_REPORT_ERROR" => ApiErrorType::AssetReportError,
            "RECAPTCHA_ERROR" => ApiErrorType::RecaptchaError,
            "OAUTH_ERROR" => ApiErrorType::OauthError,
            "PAYMENT_ERROR" => ApiErrorType::PaymentError,
            "BANK_TRANSFER_ERROR" => ApiErrorType::BankTransferError,
            _ => ApiErrorType::Other(value),
        }
    }
}

impl From<ApiErrorType> for String {
    fn from(value: ApiErrorType) -> Self {
        match value {
            ApiErrorType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the kind an API error code determines, if any.
pub fn kind_for_error_code(code: &str) -> Option<ErrorKind> {
    match code {
        "MISSING_BODY" => Some(ErrorKind::Validation),
        "INVALID_ACCESS_TOKEN" | "ITEM_LOGIN_REQUIRED" | "INSUFFICIENT_CREDENTIALS" => {
            Some(ErrorKind::Authentication)
        }
        "INVALID_ENDPOINT" => Some(ErrorKind::NotFound),
        "RATE_LIMIT_EXCEEDED" => Some(ErrorKind::RateLimit),
        "INSTITUTION_DOWN" | "INTERNAL_ERROR" => Some(ErrorKind::Server),
        _ => None,
    }
}

/// End-user message the API associates with a known error code.
pub fn display_message_for(code: &str) -> Option<&'static str> {
    match code {
        "INVALID_ACCESS_TOKEN" => {
            Some("Unable to verify your credentials. Please reconnect your account.")
        }
        "INVALID_REQUEST" => {
            Some("There was an issue with your request. Please check your parameters.")
        }
        "RATE_LIMIT_EXCEEDED" => Some("Too many requests. Please try again in a few moments."),
        "ITEM_LOGIN_REQUIRED" => Some("Please log in to your financial institution to continue."),
        "INSTITUTION_DOWN" => {
            Some("This institution is temporarily unavailable. Please try again later.")
        }
        "INSUFFICIENT_CREDENTIALS" => Some("Additional verification is required."),
        _ => None,
    }
}

/// Remediation the API suggests for a known error code.
pub fn suggested_action_for(code: &str) -> Option<&'static str> {
    match code {
        "INVALID_ACCESS_TOKEN" => Some("Re-initialize Link to reconnect the account"),
        "RATE_LIMIT_EXCEEDED" => Some("Wait before making additional requests"),
        "ITEM_LOGIN_REQUIRED" => Some("Update credentials via Link update mode"),
        "INSTITUTION_DOWN" => Some("Retry the request later or use cached data"),
        _ => None,
    }
}

/// A decoded API error body.
///
/// Every field is optional; members this SDK does not know, and known
/// members whose value has the wrong type, are kept in
/// [`extra`](ApiErrorBody::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Broad error category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ApiErrorType>,
    /// Specific error code, e.g. `INVALID_ACCESS_TOKEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Developer-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// End-user facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_message: Option<String>,
    /// Server-assigned request ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Individual causes.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub causes: Vec<String>,
    /// HTTP status as echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Link to the error reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// Suggested remediation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Unrecognized members.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Removes `key` from `map` and decodes it as `T`.
///
/// `null` reads as absent. A value of the wrong type is moved to `extra`.
fn take_field<T: DeserializeOwned>(map: &mut JsonMap, extra: &mut JsonMap, key: &str) -> Option<T> {
    let value = map.remove(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            extra.insert(key.to_owned(), value);
            None
        }
    }
}

impl ApiErrorBody {
    /// Parses a response body.
    ///
    /// Accepts the envelope itself, an envelope nested under `"error"`, or
    /// `{"error": "message"}`. Returns `None` when the body is not a JSON
    /// object.
    ///
    /// ```rust
    /// use reshadx::{ApiErrorBody, ErrorKind};
    ///
    /// let body = ApiErrorBody::parse(r#"{"error_type":"INVALID_INPUT","error_message":"bad phone"}"#)
    ///     .unwrap();
    /// assert_eq!(body.kind(), Some(ErrorKind::Validation));
    /// assert_eq!(body.error_message.as_deref(), Some("bad phone"));
    /// ```
    pub fn parse(body: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let serde_json::Value::Object(mut map) = value else {
            return None;
        };

        match map.remove("error") {
            // Outer members fill in whatever the nested envelope leaves out.
            Some(serde_json::Value::Object(mut nested)) => {
                for (key, value) in map {
                    nested.entry(key).or_insert(value);
                }
                Some(Self::from_map(nested))
            }
            Some(serde_json::Value::String(message)) => {
                let mut parsed = Self::from_map(map);
                if parsed.error_message.is_none() {
                    parsed.error_message = Some(message);
                }
                Some(parsed)
            }
            Some(other) => {
                map.insert("error".to_owned(), other);
                Some(Self::from_map(map))
            }
            None => Some(Self::from_map(map)),
        }
    }

    /// Decodes an envelope one member at a time, so a single bad member
    /// never discards the rest.
    fn from_map(mut map: JsonMap) -> Self {
        let mut extra = JsonMap::new();
        let mut body = Self {
            error_type: take_field(&mut map, &mut extra, "error_type"),
            error_code: take_field(&mut map, &mut extra, "error_code"),
            error_message: take_field(&mut map, &mut extra, "error_message"),
            display_message: take_field(&mut map, &mut extra, "display_message"),
            request_id: take_field(&mut map, &mut extra, "request_id"),
            causes: take_field(&mut map, &mut extra, "causes").unwrap_or_default(),
            status: take_field(&mut map, &mut extra, "status"),
            documentation_url: take_field(&mut map, &mut extra, "documentation_url"),
            suggested_action: take_field(&mut map, &mut extra, "suggested_action"),
            extra: JsonMap::new(),
        };
        extra.extend(map);
        body.extra = extra;
        body
    }

    /// Returns the kind determined by `error_type`, then by `error_code`.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error_type
            .as_ref()
            .and_then(ApiErrorType::kind)
            .or_else(|| self.error_code.as_deref().and_then(kind_for_error_code))
    }
}

/// Parses a `Retry-After` header value.
///
/// Accepts delta-seconds (`"30"`, and fractional `"1.5"`) or an HTTP-date
/// (`"Wed, 21 Oct 2015 07:28:00 GMT"`) interpreted relative to `now`. A date
/// in the past yields a zero delay.
///
/// ```rust
/// use reshadx::error::parse_retry_after;
/// use std::time::Duration;
///
/// let now = chrono::Utc::now();
/// assert_eq!(parse_retry_after("30", now), Some(Duration::from_secs(30)));
/// assert_eq!(parse_retry_after("soon", now), None);
/// ```
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    if let Ok(secs) = value.parse::<f64>() {
        return if secs.is_sign_negative() {
            None
        } else {
            Duration::try_from_secs_f64(secs).ok()
        };
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Turns failed API responses into SDK errors.
///
/// ## Example
///
/// ```rust
/// use reshadx::{Classifier, ErrorKind};
/// use std::time::Duration;
///
/// let classifier = Classifier::default();
/// let err = classifier.classify(
///     429,
///     Some(r#"{"error_code":"RATE_LIMIT_EXCEEDED","error_message":"Too many requests"}"#),
///     Some("12"),
/// );
///
/// assert_eq!(err.kind(), ErrorKind::RateLimit);
/// assert_eq!(err.message(), "Too many requests");
/// assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassificationConfig,
}

impl Classifier {
    /// Creates a classifier with the given configuration.
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Classifies a failed response.
    ///
    /// `retry_after` is the raw `Retry-After` header value, if present.
    pub fn classify(&self, status: u16, body: Option<&str>, retry_after: Option<&str>) -> Error {
        self.classify_at(status, body, retry_after, Utc::now())
    }

    /// Classifies a failed response, resolving HTTP-date `Retry-After`
    /// values against `now`.
    pub fn classify_at(
        &self,
        status: u16,
        body: Option<&str>,
        retry_after: Option<&str>,
        now: DateTime<Utc>,
    ) -> Error {
        let parsed = body.and_then(ApiErrorBody::parse);

        let kind = ErrorKind::from_http_status(status)
            .or_else(|| parsed.as_ref().and_then(ApiErrorBody::kind))
            .unwrap_or(ErrorKind::ReshADX);

        let message = match (&parsed, body) {
            (Some(p), _) => p
                .error_message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_owned),
            (None, Some(raw)) => Some(raw.trim())
                .filter(|m| !m.is_empty())
                .map(|m| m.chars().take(MAX_RAW_MESSAGE_CHARS).collect::<String>()),
            (None, None) => None,
        }
        .unwrap_or_else(|| format!("HTTP {}", status));

        let mut err = Error::new(kind, message).with_status(status);

        if kind == ErrorKind::RateLimit {
            let delay = retry_after
                .and_then(|value| parse_retry_after(value, now))
                .unwrap_or(self.config.default_retry_after);
            err = err.with_retry_after(self.config.clamp_retry_after(delay));
        }

        match parsed {
            Some(parsed) => self.apply_body(err, parsed),
            None => err,
        }
    }

    fn apply_body(&self, mut err: Error, body: ApiErrorBody) -> Error {
        let code = body.error_code.filter(|c| !c.is_empty());

        if let Some(request_id) = body.request_id {
            err = err.with_request_id(request_id);
        }

        let display = body
            .display_message
            .or_else(|| code.as_deref().and_then(display_message_for).map(str::to_owned));
        if let Some(display) = display {
            err = err.with_display_message(display);
        }

        let action = body
            .suggested_action
            .or_else(|| code.as_deref().and_then(suggested_action_for).map(str::to_owned));
        if let Some(action) = action {
            err = err.with_suggested_action(action);
        }

        let docs = body
            .documentation_url
            .as_deref()
            .and_then(|url| Url::parse(url).ok())
            .or_else(|| code.as_deref().and_then(|c| self.config.documentation_url(c)));
        if let Some(docs) = docs {
            err = err.with_documentation_url(docs);
        }

        for cause in body.causes {
            err = err.with_cause(cause);
        }

        if let Some(error_type) = body.error_type {
            err = err.with_context("error_type", String::from(error_type));
        }

        if let Some(status) = body.status {
            err = err.with_context("body_status", status);
        }

        for (key, value) in body.extra {
            if key == "field"
                && let Some(field) = value.as_str()
            {
                err = err.with_field(field);
            }
            err = err.with_context(key, ContextValue::from(value));
        }

        if let Some(code) = code {
            err = err.with_error_code(code);
        }

        err
    }
}

impl Error {
    /// Classifies a failed response with the default configuration.
    ///
    /// ```rust
    /// use reshadx::{Error, ErrorKind};
    ///
    /// let err = Error::from_response(404, Some(r#"{"error_message":"account not found"}"#));
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// assert_eq!(err.status(), Some(404));
    /// ```
    pub fn from_response(status: u16, body: Option<&str>) -> Self {
        Classifier::default().classify(status, body, None)
    }
}
