//! tokentally - token usage and cost accounting
//!
//! tokentally counts the tokens in a prompt and a completion with the model's
//! tokenizer, prices them per thousand tokens, scales the price by a global
//! multiplier and reports the result.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokentally::{TiktokenTokenizer, UsageEngine, UsageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = UsageEngine::builder()
//!         .tokenizer(Arc::new(TiktokenTokenizer::new()))
//!         .build()?;
//!
//!     let request = UsageRequest::new("gpt-4", "Hello, world!", "Hi!")?;
//!     let report = engine.compute_usage(request).await?;
//!     println!("total cost: {}", report.cost().total_cost());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `tokentally-error` - Error types
//! - `tokentally-core` - Requests, token usage, pricing and reports
//! - `tokentally-interface` - Tokenizer capability traits
//! - `tokentally-models` - tiktoken tokenizer
//! - `tokentally-engine` - Usage and cost engine
//! - `tokentally-server` - HTTP and batch transports, configuration, logging
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use tokentally_core::*;
pub use tokentally_engine::*;
pub use tokentally_error::*;
pub use tokentally_interface::*;
pub use tokentally_models::*;
pub use tokentally_server::*;
