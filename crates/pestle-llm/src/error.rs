//! Model service errors.

use thiserror::Error;

/// Result type for model service operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors from chat and embedding providers.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Transport failure or non-success HTTP status from the service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered but the payload was not usable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The provider could not be constructed from configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LlmError {
    pub fn http(message: impl Into<String>) -> Self {
        LlmError::Http(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        LlmError::InvalidResponse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        LlmError::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = LlmError::http("connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");

        let err = LlmError::invalid_response("no choices");
        assert!(err.to_string().contains("no choices"));
    }
}
