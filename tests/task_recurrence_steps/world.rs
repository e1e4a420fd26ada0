//! Shared world state for recurring task BDD scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use tickler::clock::ManualClock;
use tickler::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingNotificationSink},
    domain::Task,
    services::{CreateTaskRequest, TaskJobHandler, TaskReminderService, TaskScheduler},
};

/// Service type used by the BDD world.
pub type TestReminderService =
    TaskReminderService<InMemoryTaskRepository, RecordingNotificationSink, ManualClock>;

/// Recipient used for every scenario task.
pub const RECIPIENT: &str = "+15550140";

/// Scenario world for recurring task behaviour tests.
pub struct TaskRecurrenceWorld {
    pub service: TestReminderService,
    pub handler: Arc<TaskJobHandler<InMemoryTaskRepository, RecordingNotificationSink>>,
    pub notifier: RecordingNotificationSink,
    pub clock: ManualClock,
    pub pending_request: Option<CreateTaskRequest>,
    pub task: Option<Task>,
}

impl TaskRecurrenceWorld {
    /// Creates a world whose clock starts at a fixed instant.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = ManualClock::new(start);
        let notifier = RecordingNotificationSink::new();
        let scheduler = Arc::new(TaskScheduler::new(Arc::new(clock.clone())));
        let service = TaskReminderService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(notifier.clone()),
            scheduler,
        );
        let handler = Arc::new(service.job_handler());

        Self {
            service,
            handler,
            notifier,
            clock,
            pending_request: None,
            task: None,
        }
    }

    /// Returns the created task or an error naming the missing step.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskRecurrenceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskRecurrenceWorld {
    TaskRecurrenceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
