/// Error type returned by this crate.
///
/// Every failure, whatever its origin, collapses into this one shape. Use
/// [`NewsApiError::message`], [`NewsApiError::status`] and
/// [`NewsApiError::code`] to handle them uniformly.
#[derive(Debug, thiserror::Error)]
pub enum NewsApiError {
    /// Client is not usable as configured (e.g. no API key). Raised before any I/O.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Low-level IO fault surfaced by a custom operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Non-success HTTP status code.
    #[error("http error {status}: {message}")]
    Http {
        status: u16,
        /// API error code from the response body, when it had one.
        code: Option<String>,
        /// Server-supplied message, or the configured fallback message.
        message: String,
    },
    /// Success status but nothing in the body.
    #[error("API call successful but empty response body")]
    EmptyBody,
    /// Response body is not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Error reported by the API inside an otherwise successful response.
    #[error("api error{}: {message}", code_suffix(.code))]
    Api {
        code: Option<String>,
        message: String,
    },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default()
}

impl NewsApiError {
    /// Human-readable message, without the variant prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::Config(message) | Self::Decode(message) => message.clone(),
            Self::Transport(err) => err.to_string(),
            Self::Io(err) => err.to_string(),
            Self::Http { message, .. } | Self::Api { message, .. } => message.clone(),
            Self::EmptyBody => "API call successful but empty response body".to_owned(),
        }
    }

    /// Upstream HTTP status, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// API error code (e.g. `apiKeyInvalid`), if the server sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } | Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
