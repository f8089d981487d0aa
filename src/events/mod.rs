//! # Expiry-Event Trigger
//!
//! Processes batches of serialized expiry notifications. Only
//! `SecretNearExpiry` and `SecretExpired` events invoke a rotation; a
//! malformed entry is logged and skipped without aborting the rest of the
//! batch, and the batch is acknowledged as a whole regardless of individual
//! event outcomes (redelivery is the event source's responsibility).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::rotation::{RotationRequest, Rotator};

/// Event kind signalling a secret is about to expire
pub const NEAR_EXPIRY_KIND: &str = "SecretNearExpiry";

/// Event kind signalling a secret has expired
pub const EXPIRED_KIND: &str = "SecretExpired";

/// One expiry notification as delivered by the event source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub id: String,
    pub event_type: String,
    pub subject: String,
    pub event_time: DateTime<Utc>,
    #[serde(default)]
    pub data: Value,
}

impl TriggerEvent {
    /// The bare event kind: the final `.`-separated segment of `eventType`,
    /// so namespaced types and bare kinds both match.
    pub fn kind(&self) -> &str {
        self.event_type.rsplit('.').next().unwrap_or(&self.event_type)
    }

    /// Whether this event kind triggers a rotation
    pub fn is_expiry_notification(&self) -> bool {
        matches!(self.kind(), NEAR_EXPIRY_KIND | EXPIRED_KIND)
    }
}

/// What happened to one entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDisposition {
    /// The entry could not be parsed as a trigger event
    Malformed,
    /// The event kind is not an expiry notification
    Ignored,
    /// A rotation ran and stored a new secret
    Rotated,
    /// A rotation ran but did not store a new secret
    Failed,
}

/// Per-event result within a batch
#[derive(Debug, Clone, Serialize)]
pub struct EventResult {
    /// Event ID, when the entry parsed far enough to have one
    pub id: Option<String>,
    pub disposition: EventDisposition,
}

/// Summary of one processed batch
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub received: usize,
    pub rotated: usize,
    pub failed: usize,
    pub ignored: usize,
    pub malformed: usize,
    pub results: Vec<EventResult>,
}

impl BatchSummary {
    fn record(&mut self, id: Option<String>, disposition: EventDisposition) {
        match disposition {
            EventDisposition::Malformed => self.malformed += 1,
            EventDisposition::Ignored => self.ignored += 1,
            EventDisposition::Rotated => self.rotated += 1,
            EventDisposition::Failed => self.failed += 1,
        }
        self.results.push(EventResult { id, disposition });
    }
}

/// Process one batch of serialized events, best-effort per event.
///
/// One rotation invocation per qualifying event; a failure on one event does
/// not stop the remaining events.
pub async fn process_batch(
    rotator: &Rotator,
    request: &RotationRequest,
    raw_events: &[Value],
) -> BatchSummary {
    let mut summary = BatchSummary { received: raw_events.len(), ..Default::default() };

    for raw in raw_events {
        let event: TriggerEvent = match serde_json::from_value(raw.clone()) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "Skipping malformed event in batch");
                summary.record(None, EventDisposition::Malformed);
                continue;
            }
        };

        if !event.is_expiry_notification() {
            info!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Ignoring event of non-expiry kind"
            );
            summary.record(Some(event.id), EventDisposition::Ignored);
            continue;
        }

        info!(
            event_id = %event.id,
            event_type = %event.event_type,
            subject = %event.subject,
            "Expiry notification received; rotating credential"
        );

        match rotator.rotate(request).await {
            Ok(outcome) if outcome.stored() => {
                summary.record(Some(event.id), EventDisposition::Rotated);
            }
            Ok(outcome) => {
                error!(
                    event_id = %event.id,
                    outcome = ?outcome,
                    "Event-triggered rotation did not store a new secret"
                );
                summary.record(Some(event.id), EventDisposition::Failed);
            }
            Err(err) => {
                error!(event_id = %event.id, error = %err, "Event-triggered rotation failed");
                summary.record(Some(event.id), EventDisposition::Failed);
            }
        }
    }

    summary
}
