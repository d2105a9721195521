//! Tokenizer capability traits.

use std::sync::Arc;
use tokentally_error::UsageResult;

/// A single token code.
pub type Token = u32;

/// Encoder resolved for one model.
///
/// Encoding must be a pure function of the text: implementations are shared
/// across threads and invoked concurrently for the prompt and the completion.
pub trait TokenEncoder: Send + Sync {
    /// Name of the underlying encoding (e.g. `cl100k_base`).
    fn encoding_name(&self) -> &str;

    /// Encode text into the ordered sequence of token codes.
    ///
    /// # Errors
    ///
    /// Returns `Tokenization` if the encoder fails on this text.
    fn encode(&self, text: &str) -> UsageResult<Vec<Token>>;

    /// Count the tokens in text.
    ///
    /// Empty text always counts as zero tokens.
    ///
    /// # Errors
    ///
    /// Returns `Tokenization` if the encoder fails on this text.
    fn count(&self, text: &str) -> UsageResult<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.encode(text)?.len())
    }
}

/// Resolves model identifiers to encoders.
pub trait Tokenizer: Send + Sync {
    /// Resolve the encoder for a model.
    ///
    /// Called once per request before any counting starts. May block while an
    /// encoding loads, so async callers run it on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedModel` if the model is not known to the tokenizer.
    fn resolve(&self, model: &str) -> UsageResult<Arc<dyn TokenEncoder>>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Arc<T> {
    fn resolve(&self, model: &str) -> UsageResult<Arc<dyn TokenEncoder>> {
        (**self).resolve(model)
    }
}
