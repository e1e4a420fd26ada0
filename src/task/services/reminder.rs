//! Service layer coordinating the task store and the job scheduler.

use super::{
    CreateTaskRequest, SendReminderRequest, TaskJob, TaskJobHandler, TaskScheduler,
    UpdateTaskRequest, reminder_body,
};
use crate::scheduler::{JobKind, SchedulerError};
use crate::task::{
    domain::{DeliveryId, Task, TaskDomainError, TaskId},
    ports::{DeliveryError, NotificationSink, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Service-level errors for reminder task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation or parsing failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Notification delivery failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    /// Job registration or cancellation failed.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

impl TaskServiceError {
    fn from_repository(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for reminder service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Reminder task orchestration service.
///
/// Every write goes to the repository first and then to the scheduler, which
/// keeps at most one interval job and one pending reminder job per task
/// created through this service. Updates are serialized so the stored
/// recurrence and the registered interval job always agree; clones share the
/// same update lock.
pub struct TaskReminderService<R, N, C>
where
    R: TaskRepository,
    N: NotificationSink,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    scheduler: Arc<TaskScheduler<C>>,
    updates: Arc<Mutex<()>>,
}

impl<R, N, C> Clone for TaskReminderService<R, N, C>
where
    R: TaskRepository,
    N: NotificationSink,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifier: Arc::clone(&self.notifier),
            scheduler: Arc::clone(&self.scheduler),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl<R, N, C> TaskReminderService<R, N, C>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new reminder service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        scheduler: Arc<TaskScheduler<C>>,
    ) -> Self {
        Self {
            repository,
            notifier,
            scheduler,
            updates: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the scheduler this service registers jobs with.
    #[must_use]
    pub const fn scheduler(&self) -> &Arc<TaskScheduler<C>> {
        &self.scheduler
    }

    /// Builds the job handler the scheduler executor should run with.
    #[must_use]
    pub fn job_handler(&self) -> TaskJobHandler<R, N> {
        TaskJobHandler::new(Arc::clone(&self.repository), Arc::clone(&self.notifier))
    }

    /// Creates a task and registers its jobs.
    ///
    /// Recurring tasks get an interval job whose payload is the creation
    /// template; every regeneration inserts that same template again. Every
    /// task gets a one-shot reminder job at its reminder instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for missing or malformed fields,
    /// or repository and scheduler errors.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let fields = request.into_new_task()?;
        let task = self.repository.create(fields.clone()).await?;
        let task_id = task.id();

        if let Some(days) = fields.recurring.interval_days() {
            self.scheduler
                .schedule_interval(days, TaskJob::Regenerate(fields.clone()), task_id)?;
        }
        self.scheduler.schedule_once_at(
            fields.reminder,
            TaskJob::Reminder {
                title: fields.title,
                recipient: fields.to,
            },
            task_id,
        )?;

        info!(%task_id, recurring = %task.recurring(), "created task");
        Ok(task)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the
    /// identifier, or [`TaskServiceError::Repository`] on lookup failure.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Returns every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] on lookup failure.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Applies a partial update.
    ///
    /// When the update changes the recurrence, interval jobs owned by the
    /// task are cancelled and, for a recurring value, one new interval job is
    /// registered with the updated task as its template. Jobs are only
    /// touched once the store has accepted the update. Reminder jobs are left
    /// as they are.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the
    /// identifier, [`TaskServiceError::Domain`] for malformed fields, or
    /// repository and scheduler errors.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let _guard = self.updates.lock().await;
        let existing = self.get_task(id).await?;
        let patch = request.into_patch()?;
        let changed = patch
            .recurring
            .filter(|recurring| *recurring != existing.recurring());

        let updated = self
            .repository
            .update(id, patch)
            .await
            .map_err(TaskServiceError::from_repository)?;

        if let Some(recurring) = changed {
            let cancelled = self.scheduler.cancel_by_owner(id, JobKind::Interval)?;
            debug!(task_id = %id, cancelled, from = %existing.recurring(), to = %recurring, "recurrence changed");
            if let Some(days) = recurring.interval_days() {
                self.scheduler.schedule_interval(
                    days,
                    TaskJob::Regenerate(updated.to_template()),
                    id,
                )?;
            }
        }

        info!(task_id = %id, "updated task");
        Ok(updated)
    }

    /// Deletes a task. Deleting an unknown task succeeds.
    ///
    /// Jobs already registered for the task stay scheduled: its reminder
    /// still fires and a recurring task keeps regenerating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] on persistence failure.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "deleted task; scheduled jobs left in place");
        Ok(())
    }

    /// Sends a reminder immediately, bypassing the store and the scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when `reminder`, `title` or `to`
    /// is missing, or [`TaskServiceError::Delivery`] when the sink fails.
    pub async fn send_reminder_now(
        &self,
        request: SendReminderRequest,
    ) -> TaskServiceResult<DeliveryId> {
        let (title, recipient) = request.validate()?;
        let delivery_id = self.notifier.send(recipient, &reminder_body(title)).await?;
        info!(%delivery_id, "ad-hoc reminder sent");
        Ok(delivery_id)
    }
}
