//! Shared state handed to every transport.

use std::sync::Arc;

use crate::TallyConfig;
use tokentally_core::GlobalMultiplier;
use tokentally_engine::UsageEngine;
use tokentally_error::{ConfigError, TallyResult};
use tokentally_models::TiktokenTokenizer;
use tracing::info;

/// Engine plus transport settings.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: UsageEngine,
    batch_concurrency: usize,
}

impl AppState {
    /// Creates new app state.
    pub fn new(engine: UsageEngine, batch_concurrency: usize) -> Self {
        Self {
            engine,
            batch_concurrency: batch_concurrency.max(1),
        }
    }

    /// Build the tiktoken-backed engine described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be assembled.
    pub fn from_config(config: &TallyConfig, multiplier: GlobalMultiplier) -> TallyResult<Self> {
        let pricing = config.pricing_table();
        info!(
            priced_models = pricing.len(),
            multiplier = multiplier.value(),
            deadline = ?config.deadline(),
            "Initializing usage engine"
        );

        let mut builder = UsageEngine::builder()
            .tokenizer(Arc::new(TiktokenTokenizer::new()))
            .pricing(pricing)
            .multiplier(multiplier);
        if let Some(deadline) = config.deadline() {
            builder = builder.deadline(deadline);
        }
        let engine = builder.build().map_err(ConfigError::new)?;

        Ok(Self::new(engine, config.server.batch_concurrency))
    }

    /// The usage engine.
    pub fn engine(&self) -> &UsageEngine {
        &self.engine
    }

    /// Maximum concurrent records per batch.
    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }
}
