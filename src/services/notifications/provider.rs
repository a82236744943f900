//! Core notifier trait and the per-attempt outcome type.
//!
//! Every platform adapter implements [`Notifier`]. Adapters never fail with
//! `Err`: transport errors, non-2xx responses and API-level rejections are
//! all folded into a failed [`Outcome`] so one platform can never abort a
//! dispatch to the others.

use super::platform::Platform;
use async_trait::async_trait;
use serde::Serialize;

/// Result of a single send or connection test against one platform.
///
/// `error` is present iff `success` is false. Use [`Outcome::ok`] and
/// [`Outcome::failed`] to build values so the pairing always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    success: bool,
    error: Option<String>,
}

impl Outcome {
    /// A successful attempt.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed attempt with a human-readable reason.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Uniform contract over one messaging platform's HTTP API.
///
/// Uses `async_trait` so adapters can be driven from async handlers.
/// Implementations must be Send + Sync because the registry is shared
/// across request tasks.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// The platform this adapter delivers to.
    fn platform(&self) -> Platform;

    /// Sends `message` to the configured destination with exactly one
    /// outbound call. No retries.
    async fn send(&self, message: &str) -> Outcome;

    /// Performs a lightweight, read-only call that proves the credentials
    /// are accepted.
    async fn test_connection(&self) -> Outcome;
}

/// Converts a transport-level failure into a failed outcome.
///
/// The request URL is stripped from the error first; some platform URLs
/// embed credentials.
pub(crate) fn transport_failure(platform: Platform, error: reqwest::Error) -> Outcome {
    let error = error.without_url();
    let reason = if error.is_timeout() {
        format!("{} request timed out", platform)
    } else if error.is_connect() {
        format!("Could not connect to {} API: {}", platform, error)
    } else {
        format!("{} request failed: {}", platform, error)
    };
    Outcome::failed(reason)
}

/// Joins a configured API base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_ok_has_no_error() {
        let outcome = Outcome::ok();
        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_outcome_failed_carries_error() {
        let outcome = Outcome::failed("channel_not_found");
        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some("channel_not_found"));
    }

    #[test]
    fn test_outcome_serializes_null_error_on_success() {
        let json = serde_json::to_value(Outcome::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "error": null}));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://slack.com/api", "chat.postMessage"),
            "https://slack.com/api/chat.postMessage"
        );
        assert_eq!(
            join_url("http://127.0.0.1:9000/", "/bot1:x/getMe"),
            "http://127.0.0.1:9000/bot1:x/getMe"
        );
    }
}
