//! Callback contract invoked when jobs fire.

use super::FiredJob;
use async_trait::async_trait;
use thiserror::Error;

/// Result type returned by job handlers.
pub type JobResult = Result<(), JobError>;

/// Failure reported by a job handler.
///
/// The scheduler logs these and carries on; they never stop the executor.
#[derive(Debug, Error)]
#[error("job handler failed: {0}")]
pub struct JobError(Box<dyn std::error::Error + Send + Sync>);

impl JobError {
    /// Wraps the underlying failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }
}

/// Receives claimed firings from the scheduler executor.
#[async_trait]
pub trait JobHandler<P>: Send + Sync
where
    P: Send + 'static,
{
    /// Processes one firing.
    ///
    /// # Errors
    ///
    /// Returns [`JobError`] when the work for this firing failed. The firing
    /// is not retried.
    async fn handle(&self, job: FiredJob<P>) -> JobResult;
}
