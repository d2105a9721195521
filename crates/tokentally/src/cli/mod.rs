//! Command-line interface module.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{handle_batch, handle_encode, handle_pricing, handle_usage};
