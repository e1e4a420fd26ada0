//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Recurrence kind; `None` for one-shot tasks.
    pub recurring: Option<String>,
    /// Reminder instant.
    pub reminder: DateTime<Utc>,
    /// Notification recipient.
    pub recipient: String,
}

/// Insert model for task records. The identifier comes from the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Recurrence kind; `None` for one-shot tasks.
    pub recurring: Option<String>,
    /// Reminder instant.
    pub reminder: DateTime<Utc>,
    /// Notification recipient.
    pub recipient: String,
}

/// Partial update model; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement status.
    pub status: Option<String>,
    /// Replacement recurrence; `Some(None)` makes the task one-shot.
    pub recurring: Option<Option<String>>,
    /// Replacement reminder instant.
    pub reminder: Option<DateTime<Utc>>,
    /// Replacement recipient.
    pub recipient: Option<String>,
}
