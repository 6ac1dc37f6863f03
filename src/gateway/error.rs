//! Error types for translation gateway calls

use thiserror::Error;

/// Errors from a single translation request
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Gateway misconfigured (empty key, bad endpoint)
    #[error("Gateway configuration error: {0}")]
    Config(String),

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the client timeout
    #[error("Translation request timed out")]
    Timeout,

    /// Provider answered with a non-success status
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered with JSON we cannot use
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;
