//! Cost figures and the rounding rule that makes them reproducible.

use serde::Serialize;

/// Number of decimal digits every per-field cost is rounded to.
pub const COST_DECIMALS: i32 = 9;

/// Round a cost to [`COST_DECIMALS`] decimal digits.
///
/// # Examples
///
/// ```
/// use tokentally_core::round_cost;
///
/// assert_eq!(round_cost(0.000_016_000_000_000_1), 0.000016);
/// assert_eq!(round_cost(0.0), 0.0);
/// ```
pub fn round_cost(value: f64) -> f64 {
    let scale = 10f64.powi(COST_DECIMALS);
    (value * scale).round() / scale
}

/// Monetary cost of a single request.
///
/// Both per-field costs are rounded independently. The total is the sum of
/// the rounded values, normalized to the same precision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, derive_getters::Getters)]
pub struct CostBreakdown {
    /// Cost of the prompt tokens.
    prompt_cost: f64,
    /// Cost of the completion tokens.
    completion_cost: f64,
    /// Sum of the prompt and completion costs.
    total_cost: f64,
}

impl CostBreakdown {
    /// Build a breakdown from unrounded per-field costs.
    pub fn new(prompt_cost: f64, completion_cost: f64) -> Self {
        let prompt_cost = round_cost(prompt_cost);
        let completion_cost = round_cost(completion_cost);
        Self {
            prompt_cost,
            completion_cost,
            total_cost: round_cost(prompt_cost + completion_cost),
        }
    }

    /// The breakdown reported for models with no pricing entry.
    pub fn zero() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_rounded_fields() {
        let cost = CostBreakdown::new(0.000_000_000_4, 0.000_000_000_4);
        assert_eq!(cost.prompt_cost, 0.0);
        assert_eq!(cost.completion_cost, 0.0);
        assert_eq!(cost.total_cost, 0.0);
    }

    #[test]
    fn test_rounding_is_per_field() {
        let cost = CostBreakdown::new(0.000_000_000_6, 0.000_000_000_6);
        assert_eq!(cost.prompt_cost, 0.000_000_001);
        assert_eq!(cost.completion_cost, 0.000_000_001);
        assert_eq!(cost.total_cost, 0.000_000_002);
    }

    #[test]
    fn test_total_has_no_float_drift() {
        let cost = CostBreakdown::new(0.000_016, 0.000_01);
        assert_eq!(cost.prompt_cost + cost.completion_cost, 2.6000000000000002e-5);
        assert_eq!(cost.total_cost, 0.000_026);
    }

    #[test]
    fn test_zero() {
        let cost = CostBreakdown::zero();
        assert_eq!(*cost.total_cost(), 0.0);
    }
}
