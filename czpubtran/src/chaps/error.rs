//! CRWS client error types.

use super::convert::ConversionError;

/// Errors from the CRWS HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ChapsError {
    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// API returned an unexpected status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Combination list response carried no `data`
    #[error("timetable combination API returned no data")]
    NoData,

    /// Combination ID is not offered to this user
    #[error("timetable combination {0} not found")]
    CombinationNotFound(String),

    /// Cached guid was rejected as expired; it has been purged
    #[error("timetable combination {0} expired")]
    ExpiredCombination(String),

    /// Another request for the same user was running
    #[error("parallel API access is not allowed")]
    ParallelAccess,

    /// Search response did not contain a handle
    #[error("no connection found from {from} to {to}")]
    NoConnection { from: String, to: String },

    /// Response decoded but did not have the expected shape
    #[error("invalid connection data: {0}")]
    Conversion(#[from] ConversionError),

    /// Client configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChapsError {
    /// Returns true if repeating the same call later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ChapsError::Http(_) | ChapsError::Timeout | ChapsError::ParallelAccess
        )
    }

    /// Build a `Json` error keeping the start of the offending body.
    pub(crate) fn json(err: &serde_json::Error, body: &str) -> Self {
        ChapsError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

impl From<reqwest::Error> for ChapsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChapsError::Timeout
        } else {
            ChapsError::Http(err)
        }
    }
}
