//! Usage and cost engine for tokentally.
//!
//! [`UsageEngine::compute_usage`] resolves a tokenizer for the request's model,
//! counts prompt and completion tokens concurrently, and prices the result
//! against a shared [`PricingTable`](tokentally_core::PricingTable).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokentally_core::UsageRequest;
//! use tokentally_engine::UsageEngine;
//! use tokentally_models::TiktokenTokenizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = UsageEngine::builder()
//!         .tokenizer(Arc::new(TiktokenTokenizer::new()))
//!         .build()?;
//!
//!     let request = UsageRequest::new("gpt-3.5-turbo", "Hello, world!", "Hi!")?;
//!     let report = engine.compute_usage(request).await?;
//!     println!("{}", serde_json::to_string(&report)?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;

pub use engine::{UsageEngine, UsageEngineBuilder};
