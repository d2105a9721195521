//! Result of one usage computation.

use crate::{CostBreakdown, TokenUsage};
use serde::Serialize;

/// Token usage and cost for a single request.
///
/// Serializes as `{"usage": {...}, "cost": {...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_getters::Getters)]
pub struct UsageReport {
    /// Token counts.
    usage: TokenUsage,
    /// Cost figures.
    cost: CostBreakdown,
    /// Whether the model had a pricing entry. Unpriced reports carry zero cost.
    #[serde(skip)]
    priced: bool,
}

impl UsageReport {
    /// Report for a model with a pricing entry.
    pub fn new(usage: TokenUsage, cost: CostBreakdown) -> Self {
        Self {
            usage,
            cost,
            priced: true,
        }
    }

    /// Report for a model with no pricing entry.
    pub fn unpriced(usage: TokenUsage) -> Self {
        Self {
            usage,
            cost: CostBreakdown::zero(),
            priced: false,
        }
    }
}
