//! Job table and firing logic.

use super::{
    FiredJob, JobHandler, JobId, JobKind, JobSnapshot, SchedulerError, SchedulerResult,
    job::{ScheduledJob, Trigger},
};
use crate::task::domain::TaskId;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Default delay between executor ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// In-memory scheduler for one-shot and interval jobs.
///
/// `P` is the payload carried by each job and handed back on firing. Time is
/// read through `C` so tests can drive the scheduler with a manual clock.
pub struct JobScheduler<P, C> {
    clock: Arc<C>,
    jobs: Mutex<HashMap<JobId, ScheduledJob<P>>>,
    tick_interval: Duration,
    pub(super) started: AtomicBool,
}

impl<P, C> JobScheduler<P, C>
where
    P: Clone + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler ticking every [`DEFAULT_TICK_INTERVAL`].
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self::with_tick_interval(clock, DEFAULT_TICK_INTERVAL)
    }

    /// Creates a scheduler with a custom executor tick.
    #[must_use]
    pub fn with_tick_interval(clock: Arc<C>, tick_interval: Duration) -> Self {
        Self {
            clock,
            jobs: Mutex::new(HashMap::new()),
            tick_interval,
            started: AtomicBool::new(false),
        }
    }

    /// Returns the delay between executor ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    fn lock_jobs(&self) -> SchedulerResult<MutexGuard<'_, HashMap<JobId, ScheduledJob<P>>>> {
        self.jobs.lock().map_err(|_| SchedulerError::StatePoisoned)
    }

    fn insert(&self, job: ScheduledJob<P>) -> SchedulerResult<JobId> {
        let job_id = job.id;
        let mut jobs = self.lock_jobs()?;
        jobs.insert(job_id, job);
        Ok(job_id)
    }

    /// Registers a job that fires once at `at`.
    ///
    /// An instant already in the past fires on the next executor tick.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::StatePoisoned`] if the job table is
    /// unusable.
    pub fn schedule_once_at(
        &self,
        at: DateTime<Utc>,
        payload: P,
        owner: TaskId,
    ) -> SchedulerResult<JobId> {
        let job = ScheduledJob {
            id: JobId::new(),
            owner,
            trigger: Trigger::Once,
            next_fire: at,
            payload,
        };
        let job_id = self.insert(job)?;
        debug!(%job_id, task_id = %owner, fire_at = %at, "registered one-shot job");
        Ok(job_id)
    }

    /// Registers a job that fires every `period_days` days, first firing one
    /// period from now.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidPeriod`] for a zero period or
    /// [`SchedulerError::StatePoisoned`] if the job table is unusable.
    pub fn schedule_interval(
        &self,
        period_days: u32,
        payload: P,
        owner: TaskId,
    ) -> SchedulerResult<JobId> {
        if period_days == 0 {
            return Err(SchedulerError::InvalidPeriod(period_days));
        }
        let first_fire = self.clock.utc() + ChronoDuration::days(i64::from(period_days));
        let job = ScheduledJob {
            id: JobId::new(),
            owner,
            trigger: Trigger::Every { days: period_days },
            next_fire: first_fire,
            payload,
        };
        let job_id = self.insert(job)?;
        debug!(%job_id, task_id = %owner, period_days, "registered interval job");
        Ok(job_id)
    }

    /// Removes every job of `kind` owned by `owner` and returns how many
    /// were removed.
    ///
    /// A firing already claimed by the executor is not undone.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::StatePoisoned`] if the job table is
    /// unusable.
    pub fn cancel_by_owner(&self, owner: TaskId, kind: JobKind) -> SchedulerResult<usize> {
        let mut jobs = self.lock_jobs()?;
        let before = jobs.len();
        jobs.retain(|_, job| job.owner != owner || job.kind() != kind);
        let removed = before - jobs.len();
        debug!(task_id = %owner, %kind, removed, "cancelled jobs by owner");
        Ok(removed)
    }

    /// Returns the jobs of `kind` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::StatePoisoned`] if the job table is
    /// unusable.
    pub fn jobs_for_owner(&self, owner: TaskId, kind: JobKind) -> SchedulerResult<Vec<JobSnapshot>> {
        let jobs = self.lock_jobs()?;
        Ok(jobs
            .values()
            .filter(|job| job.owner == owner && job.kind() == kind)
            .map(ScheduledJob::snapshot)
            .collect())
    }

    /// Returns the number of registered jobs.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::StatePoisoned`] if the job table is
    /// unusable.
    pub fn job_count(&self) -> SchedulerResult<usize> {
        Ok(self.lock_jobs()?.len())
    }

    /// Claims every job due at `now`.
    ///
    /// One-shot jobs leave the table; interval jobs move to their next slot.
    /// Both happen before the lock is released, which is what makes a claim
    /// and a cancellation mutually exclusive.
    fn claim_due(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<FiredJob<P>>> {
        let mut jobs = self.lock_jobs()?;
        let due: Vec<JobId> = jobs
            .values()
            .filter(|job| job.next_fire <= now)
            .map(|job| job.id)
            .collect();

        let mut claimed = Vec::with_capacity(due.len());
        for job_id in due {
            let Some(job) = jobs.get_mut(&job_id) else {
                continue;
            };
            claimed.push(job.fired());
            match job.kind() {
                JobKind::OneShot => {
                    jobs.remove(&job_id);
                }
                JobKind::Interval => job.advance_past(now),
            }
        }
        claimed.sort_by_key(|job| job.scheduled_for);
        Ok(claimed)
    }

    /// Fires every job due at the scheduler clock's current time and returns
    /// the number of firings dispatched.
    ///
    /// Each firing runs in its own Tokio task so that a panicking handler is
    /// contained. Handler failures are logged and swallowed.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::StatePoisoned`] if the job table is
    /// unusable.
    pub async fn run_pending<H>(&self, handler: &Arc<H>) -> SchedulerResult<usize>
    where
        H: JobHandler<P> + 'static,
    {
        let now = self.clock.utc();
        let claimed = self.claim_due(now)?;
        let fired = claimed.len();
        for job in claimed {
            let job_id = job.job_id;
            let kind = job.kind;
            let owner = job.owner;
            let task_handler = Arc::clone(handler);
            let outcome = tokio::spawn(async move { task_handler.handle(job).await }).await;
            match outcome {
                Ok(Ok(())) => debug!(%job_id, %kind, task_id = %owner, "job fired"),
                Ok(Err(err)) => {
                    warn!(%job_id, %kind, task_id = %owner, error = %err, "job handler failed");
                }
                Err(err) => {
                    error!(%job_id, %kind, task_id = %owner, error = %err, "job handler aborted");
                }
            }
        }
        Ok(fired)
    }
}
