//! Error types for scheduler operations.

use thiserror::Error;

/// Result type for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors returned by the job scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Interval jobs need a period of at least one day.
    #[error("interval period must be at least one day, got {0}")]
    InvalidPeriod(u32),

    /// The job table lock was poisoned by a panicking holder.
    #[error("scheduler state lock poisoned")]
    StatePoisoned,

    /// [`JobScheduler::start`](super::JobScheduler::start) was called twice.
    #[error("scheduler executor already started")]
    AlreadyStarted,

    /// The executor task ended abnormally.
    #[error("scheduler executor failed: {0}")]
    Executor(#[from] tokio::task::JoinError),
}
