//! Record events and their persistence as activities.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`RecordEvent`]: something that happened to a record (an appointment
//!   was confirmed, a doctor must be told about a case in treatment).
//! - [`ActivityRecorder`]: background service that writes every event to
//!   the `activities` table so it shows up on the record.

pub mod bus;
pub mod recorder;

pub use bus::{EventBus, RecordEvent};
pub use recorder::ActivityRecorder;
