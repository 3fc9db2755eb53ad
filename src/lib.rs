//! `newsapi-http` is an async HTTP client for the News API sources endpoint.
//!
//! The crate wraps `GET /v2/sources` behind one call:
//! - [`NewsApiClient::get_news_sources`]
//!
//! Every call ends in an [`Outcome`]: transport faults are retried with
//! exponential backoff ([`RetryPolicy`]), while HTTP failures, empty bodies
//! and API-reported errors are returned as [`NewsApiError`] on the first
//! attempt. [`safe_call`] exposes the same retry-and-normalize wrapper for
//! custom operations.

mod client;
mod credential;
mod domain;
mod error;
mod options;
mod outcome;
mod retry;
mod safe_call;
mod types;
mod wire;

pub use client::{sources_url, NewsApiClient, DEFAULT_BASE_URL};
pub use credential::{Credential, API_KEY_HEADER};
pub use domain::{check_domain_error, ApiEnvelope};
pub use error::NewsApiError;
pub use options::ClientOptions;
pub use outcome::Outcome;
pub use retry::{is_retryable, RetryPolicy};
pub use safe_call::{safe_call, RawResponse, SafeCallConfig};
pub use types::{NewsSource, NewsSourceList};

pub type Result<T> = std::result::Result<T, NewsApiError>;
