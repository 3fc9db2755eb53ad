use std::error::Error as StdError;
use std::time::Duration;

use crate::NewsApiError;

/// Exponential backoff policy applied to transport faults.
///
/// Delay before retry `n` (0-based) is `base_delay * multiplier^n`, clamped
/// to `max_delay`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// When false, the first fault is terminal.
    pub allow_retries: bool,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    pub base_delay: Duration,
    pub multiplier: u32,
    /// Ceiling for any single backoff wait.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            allow_retries: true,
            max_retries: 2,
            base_delay: Duration::from_millis(1_000),
            multiplier: 2,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            allow_retries: false,
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Decides whether `fault`, raised on retry number `attempt`, is retried.
    pub fn should_retry(&self, fault: &NewsApiError, attempt: usize) -> bool {
        self.allow_retries && attempt < self.max_retries && is_retryable(fault)
    }

    /// Backoff to wait before retry number `attempt`.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let exp = attempt.min(u32::MAX as usize) as u32;
        let factor = self.multiplier.max(1).saturating_pow(exp);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.max_delay)
    }

    pub(crate) fn start(&self) -> RetryState {
        RetryState {
            attempt: 0,
            next_delay: self.delay_for(0),
        }
    }
}

/// Per-invocation retry bookkeeping. Never shared between calls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RetryState {
    pub attempt: usize,
    pub next_delay: Duration,
}

impl RetryState {
    /// Returns the delay to wait now and moves to the next attempt.
    pub fn advance(&mut self, policy: &RetryPolicy) -> Duration {
        let delay = self.next_delay;
        self.attempt += 1;
        self.next_delay = policy.delay_for(self.attempt);
        delay
    }
}

/// Only transport and IO faults are worth another attempt.
pub fn is_retryable(fault: &NewsApiError) -> bool {
    match fault {
        NewsApiError::Io(_) => true,
        NewsApiError::Transport(err) => is_retryable_transport(err),
        NewsApiError::Config(_)
        | NewsApiError::Http { .. }
        | NewsApiError::EmptyBody
        | NewsApiError::Decode(_)
        | NewsApiError::Api { .. } => false,
    }
}

fn is_retryable_transport(err: &reqwest::Error) -> bool {
    is_transport_kind(err) || has_io_class_source(err)
}

fn is_transport_kind(err: &reqwest::Error) -> bool {
    err.is_timeout()
        || err.is_request()
        || err.is_body()
        // is_connect() is not available on wasm32 targets (no TCP)
        || {
            #[cfg(not(target_arch = "wasm32"))]
            { err.is_connect() }
            #[cfg(target_arch = "wasm32")]
            { false }
        }
}

/// A body read cut short by the peer surfaces as a `Decode` error wrapping a
/// `Body` error wrapping an IO error, so the outer kind alone is not enough.
fn has_io_class_source(err: &reqwest::Error) -> bool {
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        if let Some(inner) = cause.downcast_ref::<reqwest::Error>() {
            if is_transport_kind(inner) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use super::{is_retryable, RetryPolicy};
    use crate::NewsApiError;

    fn io_fault() -> NewsApiError {
        io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into()
    }

    #[test]
    fn delays_double_from_one_second() {
        let policy = RetryPolicy {
            max_delay: Duration::from_secs(3_600),
            ..RetryPolicy::default()
        };
        let delays: Vec<u128> = (0..5).map(|n| policy.delay_for(n).as_millis()).collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 16_000]);
    }

    #[test]
    fn delay_is_capped_and_never_overflows() {
        let policy = RetryPolicy {
            max_delay: Duration::from_millis(5_000),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(2), Duration::from_millis(4_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(5_000));
        assert_eq!(policy.delay_for(200), Duration::from_millis(5_000));
    }

    #[test]
    fn state_advances_through_delay_sequence() {
        let policy = RetryPolicy::default();
        let mut state = policy.start();
        assert_eq!(state.advance(&policy), Duration::from_millis(1_000));
        assert_eq!(state.advance(&policy), Duration::from_millis(2_000));
        assert_eq!(state.attempt, 2);
        assert_eq!(state.next_delay, Duration::from_millis(4_000));
    }

    #[test]
    fn only_io_class_faults_are_retryable() {
        assert!(is_retryable(&io_fault()));
        assert!(!is_retryable(&NewsApiError::EmptyBody));
        assert!(!is_retryable(&NewsApiError::Decode("x".into())));
        assert!(!is_retryable(&NewsApiError::Config("x".into())));
        assert!(!is_retryable(&NewsApiError::Http {
            status: 503,
            code: None,
            message: "unavailable".into(),
        }));
        assert!(!is_retryable(&NewsApiError::Api {
            code: None,
            message: "x".into(),
        }));
    }

    #[test]
    fn budget_and_switch_bound_retries() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&io_fault(), 0));
        assert!(policy.should_retry(&io_fault(), 1));
        assert!(!policy.should_retry(&io_fault(), 2));

        let disabled = RetryPolicy {
            allow_retries: false,
            ..RetryPolicy::default()
        };
        assert!(!disabled.should_retry(&io_fault(), 0));
        assert!(!RetryPolicy::none().should_retry(&io_fault(), 0));
    }
}
