//! Bridges transport success to domain success.
//!
//! The API reports some errors inside HTTP 200 payloads (`status: "error"`
//! with `code` and `message`). [`check_domain_error`] relabels such payloads
//! as failures.

use crate::{
    wire::{self, SourcesResponse},
    NewsApiError, NewsSource, NewsSourceList, Outcome,
};

/// Payload that may carry an API-level error next to its data.
pub trait ApiEnvelope {
    /// The embedded error, if the payload reports one.
    fn api_error(&self) -> Option<NewsApiError>;
}

impl ApiEnvelope for SourcesResponse {
    fn api_error(&self) -> Option<NewsApiError> {
        envelope_error(&self.status, self.code.as_deref(), self.message.as_deref())
    }
}

fn envelope_error(status: &str, code: Option<&str>, message: Option<&str>) -> Option<NewsApiError> {
    let message = match message {
        Some(message) => message.to_owned(),
        None if status.eq_ignore_ascii_case("error") => code
            .map(|code| format!("API reported error '{code}'"))
            .unwrap_or_else(|| "API reported an error without a message".to_owned()),
        None => return None,
    };
    Some(NewsApiError::Api {
        code: code.map(str::to_owned),
        message,
    })
}

/// Turns a `Success` whose payload reports an API error into a `Failure`.
///
/// `Failure` outcomes pass through unchanged.
pub fn check_domain_error<T: ApiEnvelope>(outcome: Outcome<T>) -> Outcome<T> {
    outcome.and_then(|payload| match payload.api_error() {
        Some(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "api reported error in successful response");
            Outcome::Failure(err)
        }
        None => Outcome::Success(payload),
    })
}

/// The `/v2/sources` use case: domain check, then conversion to public types.
pub(crate) fn into_source_list(outcome: Outcome<SourcesResponse>) -> Outcome<NewsSourceList> {
    check_domain_error(outcome).map(|response| NewsSourceList {
        sources: response.sources.into_iter().map(into_news_source).collect(),
        status: response.status,
    })
}

fn into_news_source(source: wire::Source) -> NewsSource {
    NewsSource {
        id: source.id,
        name: source.name,
        description: source.description,
        url: source.url,
        category: source.category,
        language: source.language,
        country: source.country,
    }
}

#[cfg(test)]
mod tests {
    use super::{check_domain_error, into_source_list};
    use crate::{wire::SourcesResponse, NewsApiError, Outcome};

    fn response(json: &str) -> SourcesResponse {
        serde_json::from_str(json).expect("test payload must parse")
    }

    #[test]
    fn success_with_message_becomes_api_failure() {
        let payload = response(
            r#"{"status":"error","code":"rateLimited","message":"You have made too many requests","sources":[]}"#,
        );
        match check_domain_error(Outcome::Success(payload)).failure() {
            Some(NewsApiError::Api { code, message }) => {
                assert_eq!(code.as_deref(), Some("rateLimited"));
                assert_eq!(message, "You have made too many requests");
            }
            other => panic!("expected api failure, got {other:?}"),
        }
    }

    #[test]
    fn error_status_without_message_still_fails() {
        let payload = response(r#"{"status":"error","code":"unexpectedError"}"#);
        let err = check_domain_error(Outcome::Success(payload))
            .failure()
            .expect("must fail");
        assert_eq!(err.code(), Some("unexpectedError"));
    }

    #[test]
    fn failure_passes_through_unchanged() {
        let outcome: Outcome<SourcesResponse> = Outcome::Failure(NewsApiError::EmptyBody);
        assert!(matches!(
            check_domain_error(outcome),
            Outcome::Failure(NewsApiError::EmptyBody)
        ));
    }

    #[test]
    fn clean_payload_converts_to_source_list() {
        let payload = response(
            r#"{
                "status": "ok",
                "sources": [{
                    "id": "abc-news",
                    "name": "ABC News",
                    "description": "Breaking news",
                    "url": "https://abcnews.go.com",
                    "category": "general",
                    "language": "en",
                    "country": "us"
                }]
            }"#,
        );
        let list = into_source_list(Outcome::Success(payload))
            .success()
            .expect("must succeed");
        assert_eq!(list.status, "ok");
        assert_eq!(list.sources.len(), 1);
        assert_eq!(list.sources[0].id, "abc-news");
        assert_eq!(list.sources[0].country, "us");
    }
}
