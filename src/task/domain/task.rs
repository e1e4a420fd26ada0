//! Task record, creation template, partial update and wire view.

use super::{Recurrence, TaskId, format_due_date, format_reminder};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Priority assigned when a creation request omits one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Status assigned when a creation request omits one.
pub const DEFAULT_STATUS: &str = "pending";

/// Validated field set used to create a task.
///
/// The same value doubles as the regeneration template for recurring tasks:
/// every regeneration inserts exactly these fields again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Non-empty task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Open priority label.
    pub priority: String,
    /// Open status label.
    pub status: String,
    /// Recurrence kind.
    pub recurring: Recurrence,
    /// Instant at which the reminder fires.
    pub reminder: DateTime<Utc>,
    /// Notification recipient.
    pub to: String,
}

/// Task record as held by a task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: NaiveDate,
    priority: String,
    status: String,
    recurring: Recurrence,
    reminder: DateTime<Utc>,
    to: String,
}

impl Task {
    /// Builds a task from a store-assigned identifier and its field set.
    #[must_use]
    pub fn from_new(id: TaskId, fields: NewTask) -> Self {
        let NewTask {
            title,
            description,
            due_date,
            priority,
            status,
            recurring,
            reminder,
            to,
        } = fields;
        Self {
            id,
            title,
            description,
            due_date,
            priority,
            status,
            recurring,
            reminder,
            to,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the priority label.
    #[must_use]
    pub fn priority(&self) -> &str {
        &self.priority
    }

    /// Returns the status label.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the recurrence kind.
    #[must_use]
    pub const fn recurring(&self) -> Recurrence {
        self.recurring
    }

    /// Returns the reminder instant.
    #[must_use]
    pub const fn reminder(&self) -> DateTime<Utc> {
        self.reminder
    }

    /// Returns the notification recipient.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the task's fields without its identifier.
    #[must_use]
    pub fn to_template(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority.clone(),
            status: self.status.clone(),
            recurring: self.recurring,
            reminder: self.reminder,
            to: self.to.clone(),
        }
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            due_date,
            priority,
            status,
            recurring,
            reminder,
            to,
        } = patch;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = recurring {
            self.recurring = value;
        }
        if let Some(value) = reminder {
            self.reminder = value;
        }
        if let Some(value) = to {
            self.to = value;
        }
    }

    /// Returns the wire representation of this task.
    #[must_use]
    pub fn view(&self) -> TaskView {
        TaskView {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: format_due_date(self.due_date),
            priority: self.priority.clone(),
            recurring: self.recurring.to_optional_str().map(str::to_owned),
            status: self.status.clone(),
            reminder: format_reminder(self.reminder),
            to: self.to.clone(),
        }
    }
}

/// Partial update with one optional slot per attribute.
///
/// `description` is doubly optional: the outer `Option` says whether the
/// field is being changed, the inner one whether it is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement status.
    pub status: Option<String>,
    /// Replacement recurrence.
    pub recurring: Option<Recurrence>,
    /// Replacement reminder instant.
    pub reminder: Option<DateTime<Utc>>,
    /// Replacement recipient.
    pub to: Option<String>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// JSON representation of a task exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Priority label.
    pub priority: String,
    /// Recurrence kind, `null` for one-shot tasks.
    pub recurring: Option<String>,
    /// Status label.
    pub status: String,
    /// Reminder instant.
    pub reminder: String,
    /// Notification recipient.
    pub to: String,
}
