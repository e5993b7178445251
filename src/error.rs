//! Error taxonomy for a single fetch cycle.
//!
//! Every stage of the pipeline (URL building, HTTP, parsing) reports through
//! [`FetchError`]. The loader logs these and hands them to the consumer as a
//! [`crate::feed::LoadState::Failed`]; nothing here is ever turned into a panic.

use thiserror::Error;

/// Failure of one build-URL → GET → parse cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured base URL could not be turned into a request URL.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be configured (TLS backend, bad header value).
    #[error("could not set up HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// DNS, connect, TLS, timeout, or a read failure mid-body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with anything other than 200.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The body is not JSON of the expected shape.
    #[error("malformed feed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The request succeeded but there was nothing to parse.
    #[error("empty response body")]
    EmptyBody,
}

impl FetchError {
    /// True for failures that mean "could not reach the server at all".
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}
