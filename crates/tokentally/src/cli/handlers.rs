//! Command handlers.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tokentally::{AppState, ErrorBody, QueueEvent, UsageRequest, process_batch, status_for};

/// Compute and print one report. Failures print the error envelope.
pub async fn handle_usage(
    state: &AppState,
    model: String,
    prompt: String,
    completion: String,
) -> Result<bool> {
    let outcome = match UsageRequest::new(model, prompt, completion) {
        Ok(request) => state.engine().compute_usage(request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(status = %status_for(&e.kind), "Request failed");
            println!("{}", serde_json::to_string_pretty(&ErrorBody::new(e.kind.to_string()))?);
            Ok(false)
        }
    }
}

/// Charge a queue event from a file or stdin and print the summary.
pub async fn handle_batch(state: &AppState, input: &Path) -> Result<()> {
    let raw = if input == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read queue event from stdin")?;
        raw
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let event = QueueEvent::from_json(&raw)?;
    let summary = process_batch(state.engine(), event, state.batch_concurrency()).await;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// Print the token codes of a text followed by their count.
pub fn handle_encode(state: &AppState, model: &str, text: &str) -> Result<()> {
    let tokens = state.engine().encode(model, text)?;
    println!("{:?}", tokens);
    println!("{}", tokens.len());
    Ok(())
}

/// Print the pricing table with the multiplier applied.
pub fn handle_pricing(state: &AppState) {
    let engine = state.engine();
    let ratio = engine.multiplier().value();
    println!("multiplier: {}", ratio);
    println!("{:<24} {:>12} {:>12}", "model", "input/1k", "output/1k");
    for model in engine.pricing().models() {
        if let Some(entry) = engine.pricing().get(model) {
            println!(
                "{:<24} {:>12.6} {:>12.6}",
                model,
                entry.input_per_thousand() * ratio,
                entry.output_per_thousand() * ratio
            );
        }
    }
}
