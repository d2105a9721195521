#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokentally_core::GlobalMultiplier;
use tokentally_engine::UsageEngine;
use tokentally_models::TiktokenTokenizer;
use tokentally_server::AppState;

pub fn engine() -> UsageEngine {
    UsageEngine::builder()
        .tokenizer(Arc::new(TiktokenTokenizer::new()))
        .build()
        .unwrap()
}

pub fn engine_with(multiplier: f64, deadline: Option<Duration>) -> UsageEngine {
    let mut builder = UsageEngine::builder()
        .tokenizer(Arc::new(TiktokenTokenizer::new()))
        .multiplier(GlobalMultiplier::new(multiplier).unwrap());
    if let Some(deadline) = deadline {
        builder = builder.deadline(deadline);
    }
    builder.build().unwrap()
}

pub fn state() -> AppState {
    AppState::new(engine(), 4)
}

/// A queue record body.
pub fn record(model: &str, prompt: &str, completion: &str, user: &str) -> String {
    serde_json::json!({
        "prompt": prompt,
        "completion": completion,
        "model": model,
        "user": user,
        "created": "2024-01-01T00:00:00Z",
    })
    .to_string()
}
