//! Token counts for a single request.

use serde::Serialize;

/// Token usage statistics for a single request.
///
/// The total is always derived from the two counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, derive_getters::Getters)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    prompt_tokens: usize,
    /// Tokens in the completion.
    completion_tokens: usize,
    /// Total tokens (prompt + completion).
    total_tokens: usize,
}

impl TokenUsage {
    /// Create a new token usage record.
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}
