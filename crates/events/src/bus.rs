//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the HTTP handlers and
//! the [`ActivityRecorder`](crate::recorder::ActivityRecorder).

use chrono::{DateTime, Utc};
use regsuite_core::activity::ActivityType;
use regsuite_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub const APPOINTMENT_CONFIRMED: &str = "appointment.confirmed";
pub const EMERGENCY_IN_TREATMENT: &str = "emergency.in_treatment";
pub const STUDENT_REGISTERED: &str = "student.registered";
pub const LICENSE_STATUS_CHANGED: &str = "license.status_changed";
pub const UAF_INVOICED: &str = "uaf_declaration.invoiced";

// ---------------------------------------------------------------------------
// RecordEvent
// ---------------------------------------------------------------------------

/// Something that happened to one record.
///
/// Built with [`RecordEvent::new`] and the `with_*` methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEvent {
    /// Dot-separated event name, e.g. `"appointment.confirmed"`.
    pub event_type: String,

    /// Entity kind the event is about (`"appointment"`, `"student"`).
    pub entity_type: String,

    pub entity_id: DbId,

    /// Human-readable line shown on the record.
    pub summary: String,

    pub activity_type: ActivityType,

    /// Login of the user who should act on it.
    pub assigned_to: Option<String>,

    pub due_date: Option<Date>,

    /// Id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl RecordEvent {
    /// A notification about `entity_type` #`entity_id`.
    pub fn new(
        event_type: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: DbId,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            entity_type: entity_type.into(),
            entity_id,
            summary: summary.into(),
            activity_type: ActivityType::Notification,
            assigned_to: None,
            due_date: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_activity_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = activity_type;
        self
    }

    /// Route the resulting activity to a user; `None` leaves it unassigned.
    pub fn with_assignee(mut self, login: Option<String>) -> Self {
        self.assigned_to = login;
        self
    }

    pub fn with_due_date(mut self, due: Date) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<RecordEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: RecordEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RecordEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let due = Date::from_ymd_opt(2026, 5, 1).unwrap();
        bus.publish(
            RecordEvent::new(APPOINTMENT_CONFIRMED, "appointment", 42, "Appointment confirmed")
                .with_activity_type(ActivityType::Reminder)
                .with_assignee(Some("dr.mehta".into()))
                .with_due_date(due)
                .with_actor(7),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "appointment.confirmed");
        assert_eq!(received.entity_type, "appointment");
        assert_eq!(received.entity_id, 42);
        assert_eq!(received.activity_type, ActivityType::Reminder);
        assert_eq!(received.assigned_to.as_deref(), Some("dr.mehta"));
        assert_eq!(received.due_date, Some(due));
        assert_eq!(received.actor_user_id, Some(7));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(RecordEvent::new(STUDENT_REGISTERED, "student", 1, "Welcome"));

        assert_eq!(rx1.recv().await.unwrap().event_type, STUDENT_REGISTERED);
        assert_eq!(rx2.recv().await.unwrap().event_type, STUDENT_REGISTERED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(RecordEvent::new(UAF_INVOICED, "uaf_declaration", 3, "Invoiced"));
    }

    #[test]
    fn new_event_is_an_unassigned_notification() {
        let event = RecordEvent::new(EMERGENCY_IN_TREATMENT, "emergency", 9, "In treatment");
        assert_eq!(event.activity_type, ActivityType::Notification);
        assert!(event.assigned_to.is_none());
        assert!(event.due_date.is_none());
        assert!(event.payload.is_object());
    }
}
