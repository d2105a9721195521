//! Transports for the tokentally usage engine.
//!
//! Two thin adapters over one engine contract:
//!
//! - **HTTP**: `POST /v1/usage` answers a single record with a report or an
//!   error envelope; `POST /v1/usage/batch` charges a queue event.
//! - **Batch**: [`process_batch`] charges every record of a queue event,
//!   logging and skipping failures.
//!
//! Configuration and logging setup live here as well.
//!
//! # Example
//!
//! ```rust,no_run
//! use tokentally_core::GlobalMultiplier;
//! use tokentally_server::{AppState, TallyConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TallyConfig::load()?;
//!     let state = AppState::from_config(&config, GlobalMultiplier::from_env())?;
//!     serve(config.bind_addr()?, state).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod batch;
mod config;
mod observability;
mod response;
mod server;
mod state;

pub use api::create_router;
pub use batch::{BatchSummary, QueueEvent, QueueRecord, charge_record, process_batch};
pub use config::{LoggingSettings, ServerSettings, TallyConfig};
pub use observability::{init_observability, shutdown_observability};
pub use response::{ApiError, status_for};
pub use server::serve;
pub use state::AppState;
