//! Domain model for reminder tasks.
//!
//! The task domain covers the task record itself, its recurrence kind, the
//! typed creation template and partial-update structures, and the date
//! formats accepted at the service boundary. Infrastructure concerns stay
//! outside of the domain boundary.

mod dates;
mod error;
mod ids;
mod recurrence;
mod task;

pub use dates::{format_due_date, format_reminder, parse_due_date, parse_reminder};
pub use error::TaskDomainError;
pub use ids::{DeliveryId, TaskId};
pub use recurrence::Recurrence;
pub use task::{DEFAULT_PRIORITY, DEFAULT_STATUS, NewTask, Task, TaskPatch, TaskView};
