//! Job identifiers, kinds and snapshots.

use crate::task::domain::TaskId;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a registered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    /// Creates a new random job identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trigger kind of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Fires once at a fixed instant.
    OneShot,
    /// Fires every fixed number of days.
    Interval,
}

impl JobKind {
    /// Returns the canonical label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneShot => "one_shot",
            Self::Interval => "interval",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job descriptor held in the scheduler table.
#[derive(Debug, Clone)]
pub(super) struct ScheduledJob<P> {
    pub(super) id: JobId,
    pub(super) owner: TaskId,
    pub(super) trigger: Trigger,
    pub(super) next_fire: DateTime<Utc>,
    pub(super) payload: P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Trigger {
    Once,
    Every { days: u32 },
}

impl<P: Clone> ScheduledJob<P> {
    pub(super) const fn kind(&self) -> JobKind {
        match self.trigger {
            Trigger::Once => JobKind::OneShot,
            Trigger::Every { .. } => JobKind::Interval,
        }
    }

    pub(super) const fn period_days(&self) -> Option<u32> {
        match self.trigger {
            Trigger::Once => None,
            Trigger::Every { days } => Some(days),
        }
    }

    /// Moves an interval job to its first slot strictly after `now`.
    ///
    /// Slots are counted from the previous scheduled time, not from `now`,
    /// so late ticks do not shift the schedule.
    pub(super) fn advance_past(&mut self, now: DateTime<Utc>) {
        let Trigger::Every { days } = self.trigger else {
            return;
        };
        let period = Duration::days(i64::from(days));
        while self.next_fire <= now {
            self.next_fire += period;
        }
    }

    pub(super) fn fired(&self) -> FiredJob<P> {
        FiredJob {
            job_id: self.id,
            kind: self.kind(),
            owner: self.owner,
            scheduled_for: self.next_fire,
            payload: self.payload.clone(),
        }
    }

    pub(super) fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            job_id: self.id,
            kind: self.kind(),
            owner: self.owner,
            next_fire: self.next_fire,
            period_days: self.period_days(),
        }
    }
}

/// A claimed firing handed to a [`JobHandler`](super::JobHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredJob<P> {
    /// Identifier of the job that fired.
    pub job_id: JobId,
    /// Trigger kind of the job.
    pub kind: JobKind,
    /// Task that owns the job.
    pub owner: TaskId,
    /// Instant the firing was scheduled for.
    pub scheduled_for: DateTime<Utc>,
    /// Job payload.
    pub payload: P,
}

/// Read-only view of a registered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSnapshot {
    /// Job identifier.
    pub job_id: JobId,
    /// Trigger kind.
    pub kind: JobKind,
    /// Owning task.
    pub owner: TaskId,
    /// Next instant at which the job fires.
    pub next_fire: DateTime<Utc>,
    /// Period in days for interval jobs.
    pub period_days: Option<u32>,
}
