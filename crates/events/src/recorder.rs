//! Persists [`RecordEvent`]s as activities.
//!
//! [`ActivityRecorder`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes one `activities` row per event. It runs as a long-lived task
//! and stops when the bus is dropped.

use regsuite_db::models::activity::{Activity, CreateActivity};
use regsuite_db::repositories::ActivityRepo;
use regsuite_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::RecordEvent;

/// Background service that records events on their records.
pub struct ActivityRecorder;

impl ActivityRecorder {
    /// Run the recording loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<RecordEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::record(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            entity_id = event.entity_id,
                            "Failed to record event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity recorder lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity recorder shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `activities` table.
    pub async fn record(pool: &DbPool, event: &RecordEvent) -> Result<Activity, sqlx::Error> {
        ActivityRepo::create(pool, &to_activity(event)).await
    }
}

/// The activity row an event becomes.
pub fn to_activity(event: &RecordEvent) -> CreateActivity {
    let note = match &event.payload {
        serde_json::Value::Object(map) if map.is_empty() => None,
        payload => Some(payload.to_string()),
    };
    CreateActivity {
        entity_type: event.entity_type.clone(),
        entity_id: event.entity_id,
        activity_type: event.activity_type.as_str().to_string(),
        summary: event.summary.clone(),
        note,
        assigned_to: event.assigned_to.clone(),
        due_date: event.due_date,
        dedupe_key: None,
    }
}

#[cfg(test)]
mod tests {
    use regsuite_core::activity::ActivityType;

    use super::*;
    use crate::bus;

    #[test]
    fn event_maps_onto_activity_columns() {
        let event = RecordEvent::new(bus::APPOINTMENT_CONFIRMED, "appointment", 5, "Visit on 2 May")
            .with_activity_type(ActivityType::Reminder)
            .with_assignee(Some("dr.rao".into()));

        let activity = to_activity(&event);
        assert_eq!(activity.entity_type, "appointment");
        assert_eq!(activity.entity_id, 5);
        assert_eq!(activity.activity_type, "reminder");
        assert_eq!(activity.summary, "Visit on 2 May");
        assert_eq!(activity.assigned_to.as_deref(), Some("dr.rao"));
        assert!(activity.note.is_none());
        assert!(activity.dedupe_key.is_none());
    }

    #[test]
    fn payload_becomes_the_note() {
        let event = RecordEvent::new(bus::UAF_INVOICED, "uaf_declaration", 2, "Invoiced")
            .with_payload(serde_json::json!({"amount": 1200.5}));

        let activity = to_activity(&event);
        assert_eq!(activity.note.as_deref(), Some(r#"{"amount":1200.5}"#));
    }
}
