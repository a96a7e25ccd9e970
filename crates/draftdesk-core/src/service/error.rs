//! Transport-level errors.

/// Errors that can occur while talking to the backend.
///
/// The workflow does not distinguish between these; every variant is a
/// recoverable failure of the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configured endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ServiceError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}
