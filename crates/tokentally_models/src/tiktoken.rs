//! tiktoken-backed tokenizer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer as Encoding, get_tokenizer};
use tokentally_error::{UsageError, UsageErrorKind, UsageResult};
use tokentally_interface::{Token, TokenEncoder, Tokenizer};
use tracing::{debug, instrument};

/// A loaded BPE encoding.
pub struct TiktokenEncoder {
    name: String,
    bpe: CoreBPE,
}

impl std::fmt::Debug for TiktokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenEncoder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TokenEncoder for TiktokenEncoder {
    fn encoding_name(&self) -> &str {
        &self.name
    }

    fn encode(&self, text: &str) -> UsageResult<Vec<Token>> {
        // Special-token markers in user text are counted as ordinary text.
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|token| token as Token)
            .collect())
    }
}

/// Resolves OpenAI model identifiers to tiktoken encodings.
///
/// Loading a BPE is expensive, so each encoding is loaded at most once and
/// shared by every model that uses it.
///
/// # Examples
///
/// ```no_run
/// use tokentally_interface::Tokenizer;
/// use tokentally_models::TiktokenTokenizer;
///
/// let tokenizer = TiktokenTokenizer::new();
/// let encoder = tokenizer.resolve("gpt-3.5-turbo").unwrap();
/// assert_eq!(encoder.encoding_name(), "cl100k_base");
/// assert!(encoder.count("Hello, world!").unwrap() > 0);
/// ```
#[derive(Debug, Default)]
pub struct TiktokenTokenizer {
    loaded: Mutex<HashMap<String, Arc<TiktokenEncoder>>>,
}

impl TiktokenTokenizer {
    /// Create a tokenizer with no encodings loaded.
    pub fn new() -> Self {
        Self::default()
    }
}

fn encoding_name(encoding: Encoding) -> String {
    match encoding {
        Encoding::Cl100kBase => "cl100k_base".to_string(),
        Encoding::P50kBase => "p50k_base".to_string(),
        Encoding::P50kEdit => "p50k_edit".to_string(),
        Encoding::R50kBase => "r50k_base".to_string(),
        Encoding::Gpt2 => "gpt2".to_string(),
        #[allow(unreachable_patterns)]
        other => format!("{:?}", other).to_lowercase(),
    }
}

impl Tokenizer for TiktokenTokenizer {
    #[instrument(skip(self))]
    fn resolve(&self, model: &str) -> UsageResult<Arc<dyn TokenEncoder>> {
        let encoding = get_tokenizer(model).ok_or_else(|| {
            UsageError::new(UsageErrorKind::UnsupportedModel(format!(
                "no tokenizer for model {}",
                model
            )))
        })?;
        let name = encoding_name(encoding);

        let mut loaded = self.loaded.lock().map_err(|_| {
            UsageError::new(UsageErrorKind::Tokenization(
                "tokenizer cache poisoned".to_string(),
            ))
        })?;

        if let Some(encoder) = loaded.get(&name) {
            return Ok(encoder.clone() as Arc<dyn TokenEncoder>);
        }

        debug!(encoding = %name, "Loading BPE encoding");
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            UsageError::new(UsageErrorKind::Tokenization(format!(
                "Failed to load tokenizer for {}: {}",
                model, e
            )))
        })?;
        let encoder = Arc::new(TiktokenEncoder {
            name: name.clone(),
            bpe,
        });
        loaded.insert(name, encoder.clone());
        Ok(encoder as Arc<dyn TokenEncoder>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_is_unsupported() {
        let err = TiktokenTokenizer::new().resolve("unknown-model-x").err().unwrap();
        assert!(matches!(err.kind, UsageErrorKind::UnsupportedModel(_)));
    }

    #[test]
    fn test_encoding_shared_between_models() {
        let tokenizer = TiktokenTokenizer::new();
        let a = tokenizer.resolve("gpt-4").unwrap();
        let b = tokenizer.resolve("gpt-3.5-turbo").unwrap();
        assert_eq!(a.encoding_name(), "cl100k_base");
        assert_eq!(b.encoding_name(), "cl100k_base");
        assert_eq!(tokenizer.loaded.lock().unwrap().len(), 1);
    }
}
