//! Core data types for tokentally.
//!
//! This crate provides the request, usage, pricing and report types shared by
//! the engine and its transports.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cost;
mod envelope;
mod multiplier;
mod pricing;
mod report;
mod request;
mod usage;

pub use cost::{COST_DECIMALS, CostBreakdown, round_cost};
pub use envelope::ErrorBody;
pub use multiplier::{BASE_RATIO_VAR, GlobalMultiplier, MultiplierSource};
pub use pricing::{PricingEntry, PricingTable};
pub use report::UsageReport;
pub use request::{UsageRequest, UsageRequestBuilder};
pub use usage::TokenUsage;
