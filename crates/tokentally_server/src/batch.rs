//! Batch transport for queue deliveries.
//!
//! A queue event carries many records. Each record is charged independently:
//! a record that fails is logged and skipped without affecting its siblings.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokentally_core::{UsageReport, UsageRequest};
use tokentally_engine::UsageEngine;
use tokentally_error::{JsonError, UsageResult};
use tracing::{info, instrument, warn};

/// One message delivered by the queue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueueRecord {
    /// Queue-assigned message identifier.
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// JSON-encoded usage record.
    pub body: String,
}

/// A delivery of queue messages.
///
/// # Examples
///
/// ```
/// use tokentally_server::QueueEvent;
///
/// let event = QueueEvent::from_json(
///     r#"{"Records": [{"messageId": "m-1", "body": "{\"model\":\"gpt-4\"}"}]}"#,
/// ).unwrap();
/// assert_eq!(event.records.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct QueueEvent {
    /// Messages in delivery order.
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

impl QueueEvent {
    /// Decode a queue event.
    ///
    /// # Errors
    ///
    /// Returns a `JsonError` if the envelope is not a queue event.
    #[track_caller]
    pub fn from_json(body: &str) -> Result<Self, JsonError> {
        serde_json::from_str(body)
            .map_err(|e| JsonError::new(format!("Error unmarshaling queue event: {}", e)))
    }
}

/// Outcome counts for one queue event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct BatchSummary {
    /// Records charged successfully.
    processed: usize,
    /// Records logged and skipped.
    skipped: usize,
}

/// Charge every record of a queue event.
///
/// At most `concurrency` records are in flight at once.
#[instrument(skip(engine, event), fields(records = event.records.len()))]
pub async fn process_batch(
    engine: &UsageEngine,
    event: QueueEvent,
    concurrency: usize,
) -> BatchSummary {
    let outcomes: Vec<bool> = stream::iter(event.records)
        .map(|record| async move {
            let message_id = record.message_id.clone();
            match charge_record(engine, record).await {
                Ok(_) => true,
                Err(e) => {
                    warn!(message_id = ?message_id, error = %e.kind, "Skipping record");
                    false
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let processed = outcomes.iter().filter(|ok| **ok).count();
    let summary = BatchSummary {
        processed,
        skipped: outcomes.len() - processed,
    };
    info!(processed = summary.processed, skipped = summary.skipped, "Batch complete");
    summary
}

/// Decode and charge a single queue record, logging the charge.
///
/// # Errors
///
/// Returns the request-terminal error for this record.
pub async fn charge_record(engine: &UsageEngine, record: QueueRecord) -> UsageResult<UsageReport> {
    let request = UsageRequest::from_json(&record.body)?;
    let user = request.user().clone().unwrap_or_default();
    let created = request.created().clone();
    let model = request.model().clone();

    let report = engine.compute_usage(request).await?;
    info!(
        user = %user,
        created = ?created,
        model = %model,
        total_tokens = report.usage().total_tokens(),
        total_cost = report.cost().total_cost(),
        "Charge recorded"
    );
    Ok(report)
}
