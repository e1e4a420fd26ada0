//! Shared fixtures for scheduler tests.

use crate::clock::ManualClock;
use crate::scheduler::{FiredJob, JobError, JobHandler, JobResult, JobScheduler};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use std::sync::Mutex;

/// Payload that makes [`RecordingHandler`] return an error.
pub const FAIL: &str = "fail";
/// Payload that makes [`RecordingHandler`] panic.
pub const PANIC: &str = "panic";

pub type TestScheduler = JobScheduler<String, ManualClock>;

pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid start instant")
}

pub fn owner(raw: i64) -> TaskId {
    TaskId::new(raw)
}

#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::new(start_instant())
}

/// Handler recording every successful firing.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    fired: Mutex<Vec<FiredJob<String>>>,
}

impl RecordingHandler {
    pub fn fired(&self) -> Vec<FiredJob<String>> {
        self.fired.lock().expect("handler lock").clone()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.fired().into_iter().map(|job| job.payload).collect()
    }

    pub fn count_for(&self, task_id: TaskId) -> usize {
        self.fired()
            .iter()
            .filter(|job| job.owner == task_id)
            .count()
    }
}

#[async_trait]
impl JobHandler<String> for RecordingHandler {
    async fn handle(&self, job: FiredJob<String>) -> JobResult {
        match job.payload.as_str() {
            FAIL => Err(JobError::new(std::io::Error::other("handler failure"))),
            PANIC => panic!("handler panicked"),
            _ => {
                self.fired.lock().expect("handler lock").push(job);
                Ok(())
            }
        }
    }
}
