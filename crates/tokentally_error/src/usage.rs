//! Errors raised while computing usage for a single request.

use std::time::Duration;

/// Request-terminal failure conditions of the usage engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UsageErrorKind {
    /// The inbound record could not be decoded into a usage request.
    #[display("Malformed input: {}", _0)]
    MalformedInput(String),

    /// The tokenizer does not recognize the model identifier.
    #[display("Unsupported model: {}", _0)]
    UnsupportedModel(String),

    /// The tokenizer failed while encoding a text.
    #[display("Tokenization failed: {}", _0)]
    Tokenization(String),

    /// The deadline passed before both token counts were joined.
    #[display("Deadline exceeded after {:?}", _0)]
    DeadlineExceeded(Duration),
}

impl UsageErrorKind {
    /// Whether the failure was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UsageErrorKind::MalformedInput(_) | UsageErrorKind::UnsupportedModel(_)
        )
    }
}

/// Usage engine error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Usage Error: {} at {}:{}", kind, file, line)]
pub struct UsageError {
    /// The specific error kind
    pub kind: UsageErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl UsageError {
    /// Create a new usage error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokentally_error::{UsageError, UsageErrorKind};
    ///
    /// let err = UsageError::new(UsageErrorKind::Tokenization("worker panicked".into()));
    /// assert!(err.to_string().contains("worker panicked"));
    /// assert!(!err.kind.is_client_error());
    /// ```
    #[track_caller]
    pub fn new(kind: UsageErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for usage operations.
pub type UsageResult<T> = Result<T, UsageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_captured() {
        let err = UsageError::new(UsageErrorKind::UnsupportedModel("x".into()));
        assert!(err.file.ends_with("usage.rs"));
        assert!(err.line > 0);
    }

    #[test]
    fn test_client_error_classification() {
        assert!(UsageErrorKind::MalformedInput("bad".into()).is_client_error());
        assert!(UsageErrorKind::UnsupportedModel("x".into()).is_client_error());
        assert!(!UsageErrorKind::Tokenization("boom".into()).is_client_error());
        assert!(!UsageErrorKind::DeadlineExceeded(Duration::from_millis(5)).is_client_error());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = UsageError::new(UsageErrorKind::DeadlineExceeded(Duration::from_millis(250)));
        assert!(err.to_string().contains("Deadline exceeded after 250ms"));
    }
}
