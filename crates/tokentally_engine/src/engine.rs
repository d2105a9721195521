//! The usage engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokentally_core::{GlobalMultiplier, PricingTable, TokenUsage, UsageReport, UsageRequest};
use tokentally_error::{UsageError, UsageErrorKind, UsageResult};
use tokentally_interface::{Token, TokenEncoder, Tokenizer};
use tracing::{debug, instrument, warn};

/// Computes token usage and cost for individual requests.
///
/// The engine holds no per-request state. Cloning it is cheap and clones share
/// the tokenizer and pricing table.
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct UsageEngine {
    /// Tokenizer used to resolve model encoders.
    tokenizer: Arc<dyn Tokenizer>,
    /// Pricing lookup, frozen for the life of the engine.
    #[builder(default = "PricingTable::shared()")]
    pricing: Arc<PricingTable>,
    /// Multiplier applied to every cost.
    #[builder(default)]
    multiplier: GlobalMultiplier,
    /// Deadline applied by [`UsageEngine::compute_usage`].
    #[builder(default, setter(strip_option))]
    deadline: Option<Duration>,
}

impl UsageEngineBuilder {
    /// Build the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if no tokenizer was provided.
    pub fn build(self) -> Result<UsageEngine, String> {
        self.build_internal().map_err(|e| e.to_string())
    }
}

impl std::fmt::Debug for UsageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageEngine")
            .field("priced_models", &self.pricing.len())
            .field("multiplier", &self.multiplier)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl UsageEngine {
    /// Creates a new engine builder.
    pub fn builder() -> UsageEngineBuilder {
        UsageEngineBuilder::default()
    }

    /// The pricing table this engine charges against.
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// The multiplier applied to every cost.
    pub fn multiplier(&self) -> GlobalMultiplier {
        self.multiplier
    }

    /// Compute usage and cost for a request.
    ///
    /// Applies the engine's configured deadline, if any.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if the model is empty
    /// - `UnsupportedModel` if the tokenizer does not know the model
    /// - `Tokenization` if counting either text fails
    /// - `DeadlineExceeded` if the configured deadline passes first
    ///
    /// A model without a pricing entry is not an error: the report carries
    /// the token counts and zero cost.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn compute_usage(&self, request: UsageRequest) -> UsageResult<UsageReport> {
        match self.deadline {
            Some(limit) => self.compute_usage_until(request, Instant::now() + limit).await,
            None => self.run(request).await,
        }
    }

    /// Compute usage and cost, abandoning the work if `deadline` passes
    /// before both token counts are joined.
    ///
    /// # Errors
    ///
    /// As [`UsageEngine::compute_usage`], with `DeadlineExceeded` if the
    /// deadline passes first.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn compute_usage_until(
        &self,
        request: UsageRequest,
        deadline: Instant,
    ) -> UsageResult<UsageReport> {
        let started = Instant::now();
        match tokio::time::timeout_at(deadline, self.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                let budget = deadline.saturating_duration_since(started);
                warn!(?budget, "Deadline exceeded before token counts joined");
                Err(UsageError::new(UsageErrorKind::DeadlineExceeded(budget)))
            }
        }
    }

    /// Encode text with the tokenizer for `model`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedModel` or `Tokenization` as the tokenizer reports.
    pub fn encode(&self, model: &str, text: &str) -> UsageResult<Vec<Token>> {
        self.tokenizer.resolve(model)?.encode(text)
    }

    async fn run(&self, request: UsageRequest) -> UsageResult<UsageReport> {
        request.validate()?;
        let model = request.model().clone();
        let encoder = self.resolve(model.clone()).await?;
        debug!(encoding = encoder.encoding_name(), "Resolved tokenizer");

        let (prompt, completion) = request.into_texts();
        let usage = count_pair(encoder, prompt, completion).await?;
        Ok(self.price(&model, usage))
    }

    /// Resolve the encoder on the blocking pool.
    async fn resolve(&self, model: String) -> UsageResult<Arc<dyn TokenEncoder>> {
        let tokenizer = Arc::clone(&self.tokenizer);
        tokio::task::spawn_blocking(move || tokenizer.resolve(&model))
            .await
            .map_err(|e| {
                UsageError::new(UsageErrorKind::Tokenization(format!(
                    "tokenizer resolution task failed: {}",
                    e
                )))
            })?
    }

    fn price(&self, model: &str, usage: TokenUsage) -> UsageReport {
        match self.pricing.get(model) {
            Some(entry) => UsageReport::new(usage, entry.cost(&usage, self.multiplier)),
            None => {
                warn!(model, "Model not supported for pricing, reporting zero cost");
                UsageReport::unpriced(usage)
            }
        }
    }
}

/// Count prompt and completion tokens on the blocking pool and join both.
async fn count_pair(
    encoder: Arc<dyn TokenEncoder>,
    prompt: String,
    completion: String,
) -> UsageResult<TokenUsage> {
    let prompt_task = spawn_count(encoder.clone(), prompt, "prompt");
    let completion_task = spawn_count(encoder, completion, "completion");
    let (prompt_tokens, completion_tokens) = tokio::try_join!(prompt_task, completion_task)?;
    debug!(prompt_tokens, completion_tokens, "Counted tokens");
    Ok(TokenUsage::new(prompt_tokens, completion_tokens))
}

async fn spawn_count(
    encoder: Arc<dyn TokenEncoder>,
    text: String,
    field: &'static str,
) -> UsageResult<usize> {
    tokio::task::spawn_blocking(move || encoder.count(&text))
        .await
        .map_err(|e| {
            UsageError::new(UsageErrorKind::Tokenization(format!(
                "{} counting task failed: {}",
                field, e
            )))
        })?
}
