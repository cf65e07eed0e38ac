// src/pipeline/error.rs
// =============================================================================
// Error types for the fetch-extract pipeline.
//
// There are only two ways a visit can fail:
// - the URL string is not a URL at all (caught before any network traffic)
// - the GET did not come back with a 2xx response
//
// A half-broken HTML document is NOT an error. The parser recovers whatever
// anchors it can and we keep those.
// =============================================================================

use thiserror::Error;

// Failure of the HTTP collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered, but not with a 2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// Transport-level failure (DNS, connect, TLS, body read, ...)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// Failure of one worker's visit
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("fetch of '{url}' failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl VisitError {
    /// The URL this visit was for
    pub fn url(&self) -> &str {
        match self {
            VisitError::MalformedUrl { url, .. } | VisitError::Fetch { url, .. } => url,
        }
    }
}
