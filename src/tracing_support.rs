//! Tracing integration for observability.
//!
//! Errors never log themselves; constructing or classifying an error has no
//! side effects. Callers (and, later, the transport layer) decide when a
//! failure is worth recording and call [`record`] or
//! [`RecordErrorExt::record_err`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use reshadx::tracing_support::RecordErrorExt;
//!
//! tracing_subscriber::fmt().init();
//!
//! let accounts = fetch_accounts(&token).record_err()?;
//! // WARN reshadx: request failed kind="RateLimitError" status=429 ...
//! ```

use crate::Error;

/// Emits one structured event describing `err`.
///
/// Retriable kinds are logged at `WARN`, everything else at `ERROR`.
pub fn record(err: &Error) {
    let kind = err.kind().name();
    let retry_after_ms = err
        .retry_after()
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));

    if err.is_retriable() {
        tracing::warn!(
            kind,
            status = err.status(),
            request_id = err.request_id(),
            error_code = err.error_code(),
            retry_after_ms,
            error = %err,
            "request failed"
        );
    } else {
        tracing::error!(
            kind,
            status = err.status(),
            request_id = err.request_id(),
            error_code = err.error_code(),
            field = err.field(),
            error = %err,
            "request failed"
        );
    }
}

/// Records the error of a `Result` as it passes through.
pub trait RecordErrorExt {
    /// Calls [`record`] on the error, if any, and returns `self` unchanged.
    fn record_err(self) -> Self;
}

impl<T> RecordErrorExt for Result<T, Error> {
    fn record_err(self) -> Self {
        if let Err(ref err) = self {
            record(err);
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn captured<F: FnOnce()>(f: F) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn test_record_rate_limit_at_warn() {
        let err = Error::rate_limit("slow down")
            .with_status(429)
            .with_request_id("req_1")
            .with_retry_after(Duration::from_secs(2));

        let out = captured(|| record(&err));
        assert!(out.contains("WARN"));
        assert!(out.contains("RateLimitError"));
        assert!(out.contains("status=429"));
        assert!(out.contains("retry_after_ms=2000"));
    }

    #[test]
    fn test_record_saturates_huge_retry_after() {
        let err = Error::rate_limit("slow down").with_retry_after(Duration::MAX);

        let out = captured(|| record(&err));
        assert!(out.contains(&format!("retry_after_ms={}", u64::MAX)));
    }

    #[test]
    fn test_record_validation_at_error() {
        let err = Error::validation("phone_number required").with_field("phone_number");

        let out = captured(|| record(&err));
        assert!(out.contains("ERROR"));
        assert!(out.contains("ValidationError"));
        assert!(out.contains("phone_number"));
        assert!(!out.contains("status="));
    }

    #[test]
    fn test_record_err_passes_result_through() {
        let out = captured(|| {
            let ok: crate::Result<u8> = Ok(7);
            assert_eq!(ok.record_err().unwrap(), 7);

            let err: crate::Result<u8> = Err(Error::server("boom"));
            assert_eq!(err.record_err().unwrap_err().kind(), crate::ErrorKind::Server);
        });
        assert_eq!(out.matches("request failed").count(), 1);
    }
}
