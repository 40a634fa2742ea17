//! GiroMilano client error types.

use std::fmt;

/// Errors from the GiroMilano HTTP client.
#[derive(Debug)]
pub enum GiromilanoError {
    /// Request timed out while fetching upstream data
    Timeout,

    /// Upstream returned an error status code
    UpstreamStatus { status: u16, body: String },

    /// Could not connect to the upstream API
    Connection(String),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response decoded but did not have the expected shape
    UnexpectedPayload(&'static str),
}

impl fmt::Display for GiromilanoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GiromilanoError::Timeout => {
                write!(f, "request timed out while fetching upstream data")
            }
            GiromilanoError::UpstreamStatus { status, body } => {
                write!(f, "upstream error {status}: {body}")
            }
            GiromilanoError::Connection(msg) => {
                write!(f, "could not connect to upstream API - {msg}")
            }
            GiromilanoError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            GiromilanoError::UnexpectedPayload(msg) => {
                write!(f, "unexpected upstream payload: {msg}")
            }
        }
    }
}

impl std::error::Error for GiromilanoError {}

impl From<reqwest::Error> for GiromilanoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GiromilanoError::Timeout
        } else {
            GiromilanoError::Connection(err.to_string())
        }
    }
}
