use std::fmt;
use std::time::Duration;

use crate::{
    domain::into_source_list, safe_call::safe_call, wire::SourcesResponse, ClientOptions,
    Credential, NewsApiError, NewsSourceList, Outcome, RawResponse,
};

/// Production News API host.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Formats a base URL into the sources endpoint URL.
///
/// Example: `"https://newsapi.org/"` → `"https://newsapi.org/v2/sources"`
pub fn sources_url(base_url: &str) -> String {
    format!("{}/v2/sources", base_url.trim().trim_end_matches('/'))
}

#[derive(Clone)]
/// HTTP client for the News API sources endpoint.
///
/// Cheap to clone; clones share the connection pool. Concurrent calls are
/// independent and each carries its own retry budget.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
    options: ClientOptions,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("options", &self.options)
            .finish()
    }
}

impl Default for NewsApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsApiClient {
    /// Creates a client without an API key.
    ///
    /// Calls on such a client fail with [`NewsApiError::Config`] until a key
    /// is supplied via [`NewsApiClient::credential`].
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            credential: None,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client that sends `key` as `X-Api-Key` on every request.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use newsapi_http::NewsApiClient;
    ///
    /// let news = NewsApiClient::with_credential("my-api-key");
    /// ```
    pub fn with_credential(key: impl AsRef<str>) -> Self {
        Self::new().credential(key)
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `NEWSAPI_API_KEY` — API key (required)
    /// - `NEWSAPI_BASE_URL` — API host, defaults to [`DEFAULT_BASE_URL`]
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use newsapi_http::NewsApiClient;
    ///
    /// let news = NewsApiClient::from_env().expect("missing NEWSAPI_API_KEY");
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let key = std::env::var("NEWSAPI_API_KEY")
            .map_err(|_| "missing NEWSAPI_API_KEY environment variable".to_owned())?;
        if key.trim().is_empty() {
            return Err("NEWSAPI_API_KEY is set but empty".to_owned());
        }
        let client = Self::with_credential(key);
        match std::env::var("NEWSAPI_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => Ok(client.with_base_url(base_url)),
            _ => Ok(client),
        }
    }

    /// Sets or replaces the API key.
    pub fn credential(mut self, key: impl AsRef<str>) -> Self {
        self.credential = Some(Credential::new(key));
        self
    }

    /// Points the client at another host (e.g. a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Fetches the list of news sources.
    ///
    /// Transport faults are retried per [`ClientOptions`]; HTTP failures,
    /// empty bodies and API-reported errors are returned on the first
    /// attempt. Without an API key this returns [`NewsApiError::Config`]
    /// and performs no network I/O.
    pub async fn get_news_sources(&self) -> Outcome<NewsSourceList> {
        let credential = match self.require_credential() {
            Ok(credential) => credential,
            Err(err) => return Outcome::Failure(err),
        };

        let url = sources_url(&self.base_url);
        let config = self.options.call_config();
        let outcome = safe_call::<SourcesResponse, _, _>(&config, || {
            self.send_get(&url, credential)
        })
        .await;

        into_source_list(outcome)
    }

    fn require_credential(&self) -> Result<&Credential, NewsApiError> {
        match &self.credential {
            Some(credential) if !credential.is_blank() => Ok(credential),
            _ => Err(NewsApiError::Config(
                "an API key is required; build the client with NewsApiClient::with_credential"
                    .to_owned(),
            )),
        }
    }

    async fn send_get(
        &self,
        url: &str,
        credential: &Credential,
    ) -> Result<RawResponse, NewsApiError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(url, "sending request");

        // On WASM, reqwest uses AbortController for timeout; the `.timeout()`
        // method is available on both targets.
        let request = self
            .http
            .get(url)
            .timeout(Duration::from_millis(self.options.timeout_ms));
        let response = credential
            .decorate(request)
            .send()
            .await
            .map_err(NewsApiError::Transport)?;

        let status = response.status();
        match response.text().await {
            Ok(body) => Ok(RawResponse {
                status: status.as_u16(),
                body: Some(body),
            }),
            // The status already classifies the call; a lost error body only
            // costs the server message.
            Err(_) if !status.is_success() => Ok(RawResponse::without_body(status.as_u16())),
            Err(err) => Err(NewsApiError::Transport(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sources_url, NewsApiClient};
    use crate::NewsApiError;

    #[test]
    fn sources_url_strips_trailing_slash() {
        assert_eq!(
            sources_url("https://newsapi.org/"),
            "https://newsapi.org/v2/sources"
        );
        assert_eq!(
            sources_url("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/v2/sources"
        );
    }

    #[test]
    fn debug_redacts_credential() {
        let client = NewsApiClient::with_credential("secret-key");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn blank_credential_is_a_config_error() {
        let client = NewsApiClient::with_credential("   ");
        assert!(matches!(
            client.require_credential(),
            Err(NewsApiError::Config(_))
        ));
        assert!(NewsApiClient::new().require_credential().is_err());
        assert!(NewsApiClient::new().credential("k").require_credential().is_ok());
    }
}
