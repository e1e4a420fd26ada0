//! In-memory adapters for task storage and notification delivery.

mod notifier;
mod task;

pub use notifier::{RecordingNotificationSink, SentNotification};
pub use task::InMemoryTaskRepository;
