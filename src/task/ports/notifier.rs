//! Notification port used to deliver reminder messages.

use crate::task::domain::DeliveryId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification deliveries.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Delivery channel for reminder messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends `body` to `recipient` and returns the provider's delivery id.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the transport fails or the provider
    /// rejects the message. Deliveries are never retried here.
    async fn send(&self, recipient: &str, body: &str) -> DeliveryResult<DeliveryId>;
}

/// Errors returned by notification sink implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The provider answered with a non-success status.
    #[error("delivery rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code (or provider-specific code).
        status: u16,
        /// Provider message.
        message: String,
    },

    /// The request never reached the provider or the response was unreadable.
    #[error("delivery transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
