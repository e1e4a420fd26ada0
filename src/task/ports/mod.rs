//! Port contracts for reminder tasks.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod repository;

pub use notifier::{DeliveryError, DeliveryResult, NotificationSink};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use notifier::MockNotificationSink;
