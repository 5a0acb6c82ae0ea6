//! Classification of failed API responses into error kinds.

use std::time::Duration;

use proptest::prelude::*;
use reshadx::{ClassificationConfig, Classifier, Error, ErrorKind};

/// A 429 from the API with the envelope it actually sends.
#[test]
fn test_rate_limit_envelope() {
    let body = r#"{
        "error_type": "RATE_LIMIT_EXCEEDED",
        "error_code": "RATE_LIMIT_EXCEEDED",
        "error_message": "Rate limit of 100 requests per minute exceeded",
        "request_id": "req_1718000000_k3j2h1g0f",
        "causes": [],
        "status": 429
    }"#;

    let err = Classifier::default().classify(429, Some(body), Some("20"));

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert!(err.is_retriable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(20)));
    assert_eq!(err.request_id(), Some("req_1718000000_k3j2h1g0f"));
    assert_eq!(
        err.display_message(),
        Some("Too many requests. Please try again in a few moments.")
    );
    assert_eq!(
        err.suggested_action(),
        Some("Wait before making additional requests")
    );
    assert_eq!(
        err.to_string(),
        "rate limited: Rate limit of 100 requests per minute exceeded (request_id: req_1718000000_k3j2h1g0f)"
    );
}

/// An unknown endpoint is reported as not found.
#[test]
fn test_invalid_endpoint() {
    let body = r#"{"error_type":"INVALID_REQUEST","error_code":"INVALID_ENDPOINT","error_message":"Endpoint GET /v1/nope not found"}"#;
    let err = Error::from_response(404, Some(body));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.error_code(), Some("INVALID_ENDPOINT"));
}

/// A custom configuration drives documentation links and delays.
#[test]
fn test_custom_config() {
    let classifier = Classifier::new(
        ClassificationConfig::builder()
            .docs_base_url("https://sandbox.reshadx.com/errors")
            .default_retry_after(Duration::from_secs(5))
            .build(),
    );

    let err = classifier.classify(429, Some(r#"{"error_code":"RATE_LIMIT_EXCEEDED"}"#), None);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
    assert_eq!(
        err.documentation_url().map(|u| u.as_str()),
        Some("https://sandbox.reshadx.com/errors/rate_limit_exceeded")
    );
    assert_eq!(err.message(), "HTTP 429");
}

proptest! {
    /// Any status and any body classify into exactly one kind, keep the status,
    /// and never panic.
    #[test]
    fn prop_classify_total(status in 0u16..1000, body in proptest::option::of(".{0,64}")) {
        let err = Classifier::default().classify(status, body.as_deref(), None);
        prop_assert!(ErrorKind::ALL.contains(&err.kind()));
        prop_assert_eq!(err.status(), Some(status));
        prop_assert!(!err.message().is_empty());
    }

    /// Statuses that decide a kind always win over the body.
    #[test]
    fn prop_status_wins(status in prop_oneof![Just(400u16), Just(401), Just(404), Just(429), 500u16..600]) {
        let body = r#"{"error_type":"OAUTH_ERROR","error_code":"INSTITUTION_DOWN"}"#;
        let err = Classifier::default().classify(status, Some(body), None);
        prop_assert_eq!(Some(err.kind()), ErrorKind::from_http_status(status));
    }

    /// Only rate limit errors get a retry hint, and it never exceeds the cap.
    #[test]
    fn prop_retry_after_bounded(status in 400u16..600, secs in 0u64..1_000_000) {
        let config = ClassificationConfig::default();
        let max = config.max_retry_after;
        let err = Classifier::new(config).classify(status, None, Some(&secs.to_string()));

        if err.kind() == ErrorKind::RateLimit {
            let delay = err.retry_after().unwrap();
            prop_assert!(delay <= max);
            prop_assert_eq!(delay, Duration::from_secs(secs).min(max));
        } else {
            prop_assert!(err.retry_after().is_none());
        }
    }

    /// The configured fallback is capped like a server-provided value.
    #[test]
    fn prop_default_retry_after_bounded(default_secs in 0u64..10_000, max_secs in 0u64..10_000) {
        let config = ClassificationConfig::builder()
            .default_retry_after(Duration::from_secs(default_secs))
            .max_retry_after(Duration::from_secs(max_secs))
            .build();
        let err = Classifier::new(config).classify(429, None, None);
        prop_assert_eq!(err.retry_after(), Some(Duration::from_secs(default_secs.min(max_secs))));
    }
}

#[cfg(feature = "tracing")]
mod tracing_feature {
    use reshadx::Error;
    use reshadx::tracing_support::RecordErrorExt;

    /// Recording is opt-in and works without an installed subscriber.
    #[test]
    fn test_record_without_subscriber() {
        let result: reshadx::Result<()> = Err(Error::server("boom"));
        assert!(result.record_err().is_err());
    }
}
