//! Engine tests against the real tiktoken encodings.

use std::sync::Arc;

use tokentally_core::UsageRequest;
use tokentally_engine::UsageEngine;
use tokentally_error::UsageErrorKind;
use tokentally_models::TiktokenTokenizer;

fn engine() -> UsageEngine {
    UsageEngine::builder()
        .tokenizer(Arc::new(TiktokenTokenizer::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn prices_real_token_counts() {
    let request = UsageRequest::new("gpt-4", "Hello, world!", "Hello, world!").unwrap();
    let report = engine().compute_usage(request).await.unwrap();

    assert_eq!(*report.usage().prompt_tokens(), 4);
    assert_eq!(*report.usage().completion_tokens(), 4);
    assert_eq!(*report.cost().prompt_cost(), 0.00012);
    assert_eq!(*report.cost().completion_cost(), 0.00024);
}

#[tokio::test]
async fn tokenizable_but_unpriced_model() {
    let request = UsageRequest::new("text-davinci-003", "Hello, world!", "").unwrap();
    let report = engine().compute_usage(request).await.unwrap();

    assert!(*report.usage().prompt_tokens() > 0);
    assert_eq!(*report.usage().completion_tokens(), 0);
    assert_eq!(*report.cost().total_cost(), 0.0);
}

#[tokio::test]
async fn unknown_model_is_rejected() {
    let request = UsageRequest::new("unknown-model-x", "abc", "").unwrap();
    let err = engine().compute_usage(request).await.unwrap_err();
    assert!(matches!(err.kind, UsageErrorKind::UnsupportedModel(_)));
}
