//! Application services for reminder task orchestration.

mod jobs;
mod reminder;
mod requests;

pub use jobs::{TaskJob, TaskJobHandler, TaskScheduler, reminder_body};
pub use reminder::{TaskReminderService, TaskServiceError, TaskServiceResult};
pub use requests::{CreateTaskRequest, SendReminderRequest, UpdateTaskRequest};
