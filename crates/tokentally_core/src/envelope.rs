//! Failure envelope returned to callers.

use serde::{Deserialize, Serialize};

/// Body returned in place of a report when a request fails.
///
/// # Examples
///
/// ```
/// use tokentally_core::ErrorBody;
///
/// let body = ErrorBody::new("Unsupported model: mystery");
/// assert_eq!(
///     serde_json::to_string(&body).unwrap(),
///     r#"{"error":"Unsupported model: mystery"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

impl ErrorBody {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
