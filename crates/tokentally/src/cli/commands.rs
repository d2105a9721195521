//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tokentally - token usage and cost accounting for language-model traffic
#[derive(Parser, Debug)]
#[command(name = "tokentally")]
#[command(about = "Token usage and cost accounting for language-model traffic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the usage API over HTTP
    Serve {
        /// Address to bind, overriding the configuration
        #[arg(long)]
        bind: Option<String>,
    },

    /// Compute usage and cost for one record
    Usage {
        /// Model identifier
        #[arg(long)]
        model: String,

        /// Prompt text
        #[arg(long, default_value = "")]
        prompt: String,

        /// Completion text
        #[arg(long, default_value = "")]
        completion: String,
    },

    /// Charge every record of a queue event read from a file ("-" for stdin)
    Batch {
        /// Path to the queue event JSON
        input: PathBuf,
    },

    /// Print the token codes and token count of a text
    Encode {
        /// Model whose tokenizer to use
        #[arg(long, default_value = "gpt-3.5-turbo")]
        model: String,

        /// Text to encode
        text: String,
    },

    /// List priced models and their effective per-thousand rates
    Pricing,
}
