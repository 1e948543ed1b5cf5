//! Error types for the Yahoo Fantasy Sports client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, YahooError>;

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("malformed response: {context}")]
    MalformedResponse { context: String },

    #[error("cache error: {message}")]
    Cache { message: String },

    #[error("stale configuration: {message}")]
    StaleConfiguration { message: String },
}

impl YahooError {
    /// Shorthand for a `MalformedResponse` with a formatted context.
    pub(crate) fn malformed(context: impl Into<String>) -> Self {
        YahooError::MalformedResponse {
            context: context.into(),
        }
    }
}

impl From<rusqlite::Error> for YahooError {
    fn from(err: rusqlite::Error) -> Self {
        YahooError::Cache {
            message: err.to_string(),
        }
    }
}
