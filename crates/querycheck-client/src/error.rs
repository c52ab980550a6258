//! Error types for the search client.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured user agent is not a valid header value.
    #[error("invalid user agent {0:?}")]
    UserAgent(String),

    #[error("failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, TLS, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{url} answered {status}: {body}")]
    Status { url: String, status: StatusCode, body: String },

    /// The body is not JSON or lacks the result container.
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}
