use std::time::Duration;

use crate::{RetryPolicy, SafeCallConfig};

/// Configures HTTP timeout, retry and response validation behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retry transport faults at all.
    pub allow_retries: bool,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry backoff in milliseconds; doubles on every retry.
    pub retry_backoff_ms: u64,
    /// Upper bound for a single backoff wait in milliseconds.
    pub max_backoff_ms: u64,
    /// Treat a success status with an empty body as a failure.
    pub validate_empty_body: bool,
    /// Fallback message for HTTP failures without a server message.
    pub error_message: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            allow_retries: true,
            max_retries: 2,
            retry_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
            validate_empty_body: true,
            error_message: "Network error".to_owned(),
        }
    }
}

impl ClientOptions {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            allow_retries: self.allow_retries,
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_backoff_ms),
            multiplier: 2,
            max_delay: Duration::from_millis(self.max_backoff_ms),
        }
    }

    pub fn call_config(&self) -> SafeCallConfig {
        SafeCallConfig {
            error_message: self.error_message.clone(),
            validate_empty_body: self.validate_empty_body,
            retry: self.retry_policy(),
        }
    }
}
