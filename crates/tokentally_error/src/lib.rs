//! Error types for tokentally.
//!
//! This crate provides the error types shared by every tokentally crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! A model with no pricing entry is not an error. The engine reports it as a
//! warning and returns zero cost.
//!
//! # Examples
//!
//! ```
//! use tokentally_error::{TallyResult, UsageError, UsageErrorKind};
//!
//! fn resolve(model: &str) -> TallyResult<()> {
//!     Err(UsageError::new(UsageErrorKind::UnsupportedModel(model.to_string())))?
//! }
//!
//! assert!(resolve("mystery-model").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod server;
mod usage;

pub use config::ConfigError;
pub use error::{TallyError, TallyErrorKind, TallyResult};
pub use json::JsonError;
pub use server::ServerError;
pub use usage::{UsageError, UsageErrorKind, UsageResult};
