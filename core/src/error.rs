//! Error taxonomy shared by the planner, the payload parser and the web layer.

use thiserror::Error;

/// Failure of a single search request.
///
/// Errors are `Clone` because one in-flight upstream fetch may be awaited by
/// several requests at once and each of them receives the same outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Network failure or non-success status from the provider.
    #[error("upstream search provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider did not answer within the configured timeout.
    #[error("upstream search provider timed out after {0} ms")]
    UpstreamTimeout(u64),

    /// No `{` in the body, or the JSON after it did not parse.
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("unsupported language '{0}'")]
    InvalidLanguage(String),

    /// Query parameters that could not be read, such as a non-numeric page.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SearchError {
    /// HTTP status code a handler should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::UpstreamUnavailable(_) | Self::MalformedPayload(_) => 502,
            Self::UpstreamTimeout(_) => 504,
            Self::InvalidLanguage(_) | Self::InvalidRequest(_) => 400,
        }
    }

    /// Whether a fan-out may swallow this error as an empty contribution.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_) | Self::UpstreamTimeout(_))
    }
}
