//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, ServerError, UsageError};

/// Every error condition a tokentally operation can surface.
///
/// # Examples
///
/// ```
/// use tokentally_error::{TallyError, ConfigError};
///
/// let err: TallyError = ConfigError::new("bad port").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TallyErrorKind {
    /// Usage computation error
    #[from(UsageError)]
    Usage(UsageError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP listener error
    #[from(ServerError)]
    Server(ServerError),
}

/// Tokentally error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tokentally Error: {}", _0)]
pub struct TallyError(Box<TallyErrorKind>);

impl TallyError {
    /// Create a new error from a kind.
    pub fn new(kind: TallyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TallyErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TallyErrorKind
impl<T> From<T> for TallyError
where
    T: Into<TallyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for tokentally operations.
pub type TallyResult<T> = std::result::Result<T, TallyError>;
