//! Recording notification sink for tests and dry runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::DeliveryId,
    ports::{DeliveryError, DeliveryResult, NotificationSink},
};

/// A message accepted by [`RecordingNotificationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// Delivery identifier handed back to the caller.
    pub delivery_id: DeliveryId,
    /// Recipient the message was addressed to.
    pub recipient: String,
    /// Message body.
    pub body: String,
}

/// Notification sink that records messages instead of sending them.
///
/// Clones share the same record, so a test can keep one clone and hand
/// another to the service under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    sent: Arc<Mutex<Vec<SentNotification>>>,
    counter: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotificationSink {
    /// Creates an empty sink that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent sends fail with [`DeliveryError::Rejected`] while
    /// `failing` is `true`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns every message accepted so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn send(&self, recipient: &str, body: &str) -> DeliveryResult<DeliveryId> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected {
                status: 503,
                message: "recording sink is set to fail".to_owned(),
            });
        }
        let sequence = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let delivery_id = DeliveryId::new(format!("SM{sequence:032}"));
        let mut sent = self
            .sent
            .lock()
            .map_err(|err| DeliveryError::transport(std::io::Error::other(err.to_string())))?;
        sent.push(SentNotification {
            delivery_id: delivery_id.clone(),
            recipient: recipient.to_owned(),
            body: body.to_owned(),
        });
        Ok(delivery_id)
    }
}
