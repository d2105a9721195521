//! Deterministic tokenizer doubles for engine tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokentally_error::{UsageError, UsageErrorKind, UsageResult};
use tokentally_interface::{Token, TokenEncoder, Tokenizer};

/// One token per whitespace-separated word.
///
/// Knows every model except those listed in `unknown`. Texts containing
/// `"boom"` fail to encode and texts containing `"panic"` panic. Records the
/// thread each `resolve` call ran on.
#[derive(Debug, Default)]
pub struct WordTokenizer {
    pub unknown: Vec<String>,
    pub delay: Option<Duration>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    pub resolved_on: Arc<Mutex<Vec<ThreadId>>>,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(model: &str) -> Self {
        Self {
            unknown: vec![model.to_string()],
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

struct WordEncoder {
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl TokenEncoder for WordEncoder {
    fn encoding_name(&self) -> &str {
        "words"
    }

    fn encode(&self, text: &str) -> UsageResult<Vec<Token>> {
        let active = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if text.contains("panic") {
            panic!("encoder panicked");
        }
        if text.contains("boom") {
            return Err(UsageError::new(UsageErrorKind::Tokenization(
                "boom".to_string(),
            )));
        }
        Ok(text
            .split_whitespace()
            .map(|word| word.len() as Token)
            .collect())
    }
}

impl Tokenizer for WordTokenizer {
    fn resolve(&self, model: &str) -> UsageResult<Arc<dyn TokenEncoder>> {
        self.resolved_on
            .lock()
            .unwrap()
            .push(std::thread::current().id());
        if self.unknown.iter().any(|m| m == model) {
            return Err(UsageError::new(UsageErrorKind::UnsupportedModel(
                model.to_string(),
            )));
        }
        Ok(Arc::new(WordEncoder {
            delay: self.delay,
            in_flight: self.in_flight.clone(),
            max_in_flight: self.max_in_flight.clone(),
        }))
    }
}

/// `n` space-separated words, which the fake counts as `n` tokens.
pub fn words(n: usize) -> String {
    vec!["tok"; n].join(" ")
}
