use crate::NewsApiError;

/// Terminal result of one call sequence, retries included.
///
/// A success status with an empty body is reported as
/// `Failure(NewsApiError::EmptyBody)` rather than a separate variant.
#[derive(Debug)]
#[must_use = "an outcome may carry a failure that should be handled"]
pub enum Outcome<T> {
    /// The call completed and the payload decoded.
    Success(T),
    /// The call failed; see [`NewsApiError`] for the kind.
    Failure(NewsApiError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the payload, discarding any failure.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, discarding any payload.
    pub fn failure(self) -> Option<NewsApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(err) => Outcome::Failure(err),
        }
    }

    /// Chains a fallible step on the success payload.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(err) => Outcome::Failure(err),
        }
    }

    /// Converts into a `Result` so callers can use `?`.
    pub fn into_result(self) -> crate::Result<T> {
        self.into()
    }
}

impl<T> From<Outcome<T>> for Result<T, NewsApiError> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, NewsApiError>> for Outcome<T> {
    fn from(result: Result<T, NewsApiError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(err),
        }
    }
}
