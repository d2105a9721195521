//! Per-model pricing.
//!
//! The built-in table is constructed once per process and shared by reference.
//! Lookups are by exact model identifier; a dated variant such as `gpt-4-0314`
//! never falls back to `gpt-4` or the other way around.

use crate::{CostBreakdown, GlobalMultiplier, TokenUsage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Price of a model in USD per thousand tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PricingEntry {
    /// Price per thousand prompt tokens.
    input_per_thousand: f64,
    /// Price per thousand completion tokens.
    output_per_thousand: f64,
}

impl PricingEntry {
    /// Create a pricing entry from per-thousand rates.
    pub const fn new(input_per_thousand: f64, output_per_thousand: f64) -> Self {
        Self {
            input_per_thousand,
            output_per_thousand,
        }
    }

    /// Price a token usage, scaled by the global multiplier.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokentally_core::{GlobalMultiplier, PricingEntry, TokenUsage};
    ///
    /// let entry = PricingEntry::new(0.0016, 0.002);
    /// let cost = entry.cost(&TokenUsage::new(10, 5), GlobalMultiplier::default());
    /// assert_eq!(*cost.prompt_cost(), 0.000016);
    /// assert_eq!(*cost.completion_cost(), 0.00001);
    /// ```
    pub fn cost(&self, usage: &TokenUsage, multiplier: GlobalMultiplier) -> CostBreakdown {
        let ratio = multiplier.value();
        let prompt_cost = *usage.prompt_tokens() as f64 * self.input_per_thousand * ratio / 1000.0;
        let completion_cost =
            *usage.completion_tokens() as f64 * self.output_per_thousand * ratio / 1000.0;
        CostBreakdown::new(prompt_cost, completion_cost)
    }
}

const BUILTIN_PRICES: &[(&str, PricingEntry)] = &[
    ("gpt-4-vision-preview", PricingEntry::new(0.01, 0.03)),
    ("gpt-4-1106-preview", PricingEntry::new(0.01, 0.03)),
    ("gpt-4-0314", PricingEntry::new(0.03, 0.06)),
    ("gpt-4", PricingEntry::new(0.03, 0.06)),
    ("gpt-3.5-turbo-0301", PricingEntry::new(0.0016, 0.002)),
    ("gpt-3.5-turbo", PricingEntry::new(0.0016, 0.002)),
    ("gpt-3.5-turbo-16k", PricingEntry::new(0.003, 0.004)),
    ("gpt-3.5-turbo-1106", PricingEntry::new(0.001, 0.002)),
];

static BUILTIN: LazyLock<Arc<PricingTable>> = LazyLock::new(|| {
    Arc::new(PricingTable::from_entries(
        BUILTIN_PRICES
            .iter()
            .map(|(model, entry)| ((*model).to_string(), *entry)),
    ))
});

/// Read-only lookup from model identifier to pricing entry.
///
/// A missing key means the model is unpriced, which is an expected state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingTable {
    entries: HashMap<String, PricingEntry>,
}

impl PricingTable {
    /// Build a table from `(model, entry)` pairs. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, PricingEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The process-wide table of built-in prices.
    pub fn builtin() -> &'static PricingTable {
        BUILTIN.as_ref()
    }

    /// A shared handle to the built-in table. Every call returns the same table.
    pub fn shared() -> Arc<PricingTable> {
        Arc::clone(&BUILTIN)
    }

    /// A new table holding the built-in prices with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<String, PricingEntry>) -> Self {
        let mut entries = Self::builtin().entries.clone();
        entries.extend(overrides.iter().map(|(model, entry)| (model.clone(), *entry)));
        Self { entries }
    }

    /// Look up the price for an exact model identifier.
    pub fn get(&self, model: &str) -> Option<&PricingEntry> {
        self.entries.get(model)
    }

    /// Number of priced models.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Priced model identifiers in sorted order.
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        models.sort_unstable();
        models
    }
}
