//! Job payloads and the handler that runs them.

use crate::scheduler::{FiredJob, JobError, JobHandler, JobResult, JobScheduler};
use crate::task::{
    domain::NewTask,
    ports::{NotificationSink, TaskRepository},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Work attached to a scheduled job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskJob {
    /// Send a reminder message.
    Reminder {
        /// Task title captured at scheduling time.
        title: String,
        /// Recipient captured at scheduling time.
        recipient: String,
    },
    /// Insert a new task built from the stored template.
    Regenerate(NewTask),
}

/// Scheduler specialised for task jobs.
pub type TaskScheduler<C> = JobScheduler<TaskJob, C>;

/// Builds the SMS body for a reminder.
#[must_use]
pub fn reminder_body(title: &str) -> String {
    format!("Reminder: {title}")
}

/// Runs fired task jobs against the task store and the notification sink.
pub struct TaskJobHandler<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> TaskJobHandler<R, N>
where
    R: TaskRepository,
    N: NotificationSink,
{
    /// Creates a handler sharing the given repository and sink.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl<R, N> JobHandler<TaskJob> for TaskJobHandler<R, N>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
{
    async fn handle(&self, job: FiredJob<TaskJob>) -> JobResult {
        let FiredJob {
            job_id,
            owner,
            payload,
            ..
        } = job;
        match payload {
            TaskJob::Reminder { title, recipient } => {
                let delivery_id = self
                    .notifier
                    .send(&recipient, &reminder_body(&title))
                    .await
                    .map_err(JobError::new)?;
                info!(%job_id, task_id = %owner, %delivery_id, "reminder sent");
            }
            TaskJob::Regenerate(template) => {
                let task = self
                    .repository
                    .create(template)
                    .await
                    .map_err(JobError::new)?;
                info!(%job_id, task_id = %owner, new_task_id = %task.id(), "recurring task regenerated");
            }
        }
        Ok(())
    }
}
