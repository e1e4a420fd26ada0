//! In-process job scheduler for reminder and regeneration jobs.
//!
//! The scheduler keeps two kinds of jobs in memory, keyed by the task that
//! owns them:
//!
//! - one-shot jobs that fire once at a given instant and are then discarded
//! - interval jobs that fire every fixed number of days until cancelled
//!
//! A single executor task, started by the process entry point through
//! [`JobScheduler::start`], wakes on a fixed tick, claims every due job under
//! the scheduler lock and hands the claimed firings to a [`JobHandler`].
//! Claiming removes one-shot jobs and advances interval jobs before the lock
//! is released, so a concurrent [`JobScheduler::cancel_by_owner`] either
//! prevents a firing entirely or happens after it; a firing is never
//! duplicated.
//!
//! Job state is not persisted. Jobs registered before a restart are gone
//! after it.

mod engine;
mod error;
mod executor;
mod handler;
mod job;

pub use engine::{DEFAULT_TICK_INTERVAL, JobScheduler};
pub use error::{SchedulerError, SchedulerResult};
pub use executor::SchedulerHandle;
pub use handler::{JobError, JobHandler, JobResult};
pub use job::{FiredJob, JobId, JobKind, JobSnapshot};

#[cfg(test)]
mod tests;
