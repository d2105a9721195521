//! Server runtime error types.

/// Failure to bind or run the HTTP listener, with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", message, line, file)]
pub struct ServerError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TallyError, TallyErrorKind};

    #[test]
    fn test_converts_to_server_kind() {
        let err: TallyError = ServerError::new("Failed to bind 127.0.0.1:1").into();
        assert!(matches!(err.kind(), TallyErrorKind::Server(_)));
        assert!(err.to_string().contains("Server Error"));
        assert!(!err.to_string().contains("Configuration Error"));
    }
}
