use std::fmt;

use reqwest::{header::HeaderValue, RequestBuilder};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// News API key. Immutable once built; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_owned())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds `X-Api-Key: <key>` to an outgoing request.
    ///
    /// The value is marked sensitive so it stays out of `reqwest` debug
    /// output. A key that is not a valid header value makes the request
    /// fail at send time with a builder error, which is never retried.
    pub fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match HeaderValue::from_str(&self.0) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.header(API_KEY_HEADER, value)
            }
            Err(_) => request.header(API_KEY_HEADER, self.0.as_str()),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

impl From<&str> for Credential {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Credential {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}
