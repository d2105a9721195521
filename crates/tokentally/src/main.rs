//! tokentally CLI binary.
//!
//! - Serve the usage API over HTTP
//! - Compute usage for a single record or a queue event
//! - Inspect tokenization and pricing

use anyhow::Result;
use clap::Parser;
use tokentally::{AppState, GlobalMultiplier, TallyConfig, init_observability, serve, shutdown_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    use cli::{Cli, Commands, handle_batch, handle_encode, handle_pricing, handle_usage};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = TallyConfig::load_with(cli.config.as_deref())?;
    init_observability(&config.logging, cli.verbose)?;

    // The multiplier is read once and shared by every request
    let multiplier = GlobalMultiplier::from_env();
    let state = AppState::from_config(&config, multiplier)?;

    let mut success = true;
    match cli.command {
        Commands::Serve { bind } => {
            let addr = match bind {
                Some(bind) => bind.parse()?,
                None => config.bind_addr()?,
            };
            serve(addr, state).await?;
        }

        Commands::Usage {
            model,
            prompt,
            completion,
        } => {
            success = handle_usage(&state, model, prompt, completion).await?;
        }

        Commands::Batch { input } => {
            handle_batch(&state, &input).await?;
        }

        Commands::Encode { model, text } => {
            handle_encode(&state, &model, &text)?;
        }

        Commands::Pricing => handle_pricing(&state),
    }

    shutdown_observability();

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
