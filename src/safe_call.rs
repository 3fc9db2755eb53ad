//! Retry-and-normalize wrapper around a single HTTP call.
//!
//! [`safe_call`] turns whatever one network operation produces (a transport
//! fault, a non-success status, an empty body, or a JSON payload) into one
//! [`Outcome`]. Transport and IO faults are retried per [`RetryPolicy`];
//! everything else is terminal on the first attempt.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

// tokio::time::sleep is only available on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
use tokio::time::sleep;

use crate::{wire::ErrorBody, NewsApiError, Outcome, RetryPolicy};

/// Status and body of one completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// `None` when the server sent no body at all.
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-call configuration for [`safe_call`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafeCallConfig {
    /// Message used for HTTP failures whose body carries none.
    pub error_message: String,
    /// Report an empty success body as [`NewsApiError::EmptyBody`].
    ///
    /// When false the empty body goes to the JSON decoder and surfaces as
    /// [`NewsApiError::Decode`].
    pub validate_empty_body: bool,
    pub retry: RetryPolicy,
}

impl Default for SafeCallConfig {
    fn default() -> Self {
        Self {
            error_message: "Network error".to_owned(),
            validate_empty_body: true,
            retry: RetryPolicy::default(),
        }
    }
}

/// Runs `operation` until it yields a terminal outcome.
///
/// Never panics and never returns early with an error: every path ends in
/// [`Outcome::Success`] or [`Outcome::Failure`]. Dropping the returned future
/// (for example during a backoff wait) stops further attempts.
pub async fn safe_call<T, F, Fut>(config: &SafeCallConfig, mut operation: F) -> Outcome<T>
where
    T: DeserializeOwned,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<RawResponse, NewsApiError>>,
{
    let mut state = config.retry.start();
    loop {
        let fault = match operation().await {
            Ok(response) => return classify_response(config, response),
            Err(fault) => fault,
        };

        if !config.retry.should_retry(&fault, state.attempt) {
            #[cfg(feature = "tracing")]
            tracing::warn!(attempt = state.attempt, error = %fault, "giving up on request");
            return Outcome::Failure(fault);
        }

        let delay = state.advance(&config.retry);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt = state.attempt,
            delay_ms = delay.as_millis() as u64,
            error = %fault,
            "retrying request after transport fault"
        );

        wait_before_retry(delay).await;
    }
}

fn classify_response<T: DeserializeOwned>(
    config: &SafeCallConfig,
    response: RawResponse,
) -> Outcome<T> {
    if !response.is_success() {
        return Outcome::Failure(http_failure(config, response));
    }

    let body = response.body.unwrap_or_default();
    if config.validate_empty_body && body.trim().is_empty() {
        return Outcome::Failure(NewsApiError::EmptyBody);
    }

    match serde_json::from_str::<T>(&body) {
        Ok(value) => Outcome::Success(value),
        Err(err) => Outcome::Failure(NewsApiError::Decode(format!(
            "invalid response JSON: {err}; body: {body}"
        ))),
    }
}

fn http_failure(config: &SafeCallConfig, response: RawResponse) -> NewsApiError {
    let parsed = response
        .body
        .as_deref()
        .and_then(|body| serde_json::from_str::<ErrorBody>(body).ok());
    let (code, message) = match parsed {
        Some(ErrorBody { code, message, .. }) => (code, message),
        None => (None, None),
    };

    NewsApiError::Http {
        status: response.status,
        code,
        message: message.unwrap_or_else(|| config.error_message.clone()),
    }
}

/// Suspends before the next attempt.
///
/// On WASM targets this is a no-op: `tokio::time::sleep` is not available
/// and edge runtimes prefer fast failure over sleeping.
async fn wait_before_retry(delay: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    sleep(delay).await;

    #[cfg(target_arch = "wasm32")]
    let _ = delay;
}
