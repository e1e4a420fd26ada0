//! Request payloads accepted by the reminder service.
//!
//! Requests carry raw client values (dates as strings, recurrence as a
//! label). Validation and parsing into domain types happen here, so every
//! caller (HTTP or otherwise) gets the same errors.

use crate::task::domain::{
    DEFAULT_PRIORITY, DEFAULT_STATUS, NewTask, Recurrence, TaskDomainError, TaskPatch,
    parse_due_date, parse_reminder,
};
use serde::{Deserialize, Deserializer};

/// Deserializes a present value (including `null`) as `Some`, so that an
/// absent field and an explicit `null` stay distinguishable.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, TaskDomainError> {
    let raw = value.ok_or(TaskDomainError::MissingField(field))?;
    non_empty(field, raw)
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    recurring: Option<String>,
    reminder: Option<String>,
    to: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        due_date: impl Into<String>,
        reminder: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            due_date: Some(due_date.into()),
            reminder: Some(reminder.into()),
            to: Some(to.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the recurrence label (`daily`, `weekly`, `monthly` or `none`).
    #[must_use]
    pub fn with_recurring(mut self, recurring: impl Into<String>) -> Self {
        self.recurring = Some(recurring.into());
        self
    }

    /// Validates the request and parses it into a creation template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] or
    /// [`TaskDomainError::EmptyField`] when `title`, `dueDate`, `reminder` or
    /// `to` is absent or blank, [`TaskDomainError::InvalidFormat`] for
    /// unparseable dates and [`TaskDomainError::UnknownRecurrence`] for an
    /// unsupported recurrence label.
    pub fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let title = required("title", self.title.as_deref())?.to_owned();
        let due_date = parse_due_date(required("dueDate", self.due_date.as_deref())?)?;
        let reminder = parse_reminder(required("reminder", self.reminder.as_deref())?)?;
        let to = required("to", self.to.as_deref())?.to_owned();
        let recurring = Recurrence::parse_optional(self.recurring.as_deref())?;

        Ok(NewTask {
            title,
            description: self.description,
            due_date,
            priority: self.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_owned()),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_owned()),
            recurring,
            reminder,
            to,
        })
    }
}

/// Request payload for a partial task update.
///
/// Absent fields are left unchanged. For `description` and `recurring`, an
/// explicit `null` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    #[serde(deserialize_with = "present")]
    description: Option<Option<String>>,
    due_date: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    #[serde(deserialize_with = "present")]
    recurring: Option<Option<String>>,
    reminder: Option<String>,
    to: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Replaces the due date (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Replaces the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the recurrence label.
    #[must_use]
    pub fn with_recurring(mut self, recurring: impl Into<String>) -> Self {
        self.recurring = Some(Some(recurring.into()));
        self
    }

    /// Makes the task one-shot.
    #[must_use]
    pub fn without_recurring(mut self) -> Self {
        self.recurring = Some(None);
        self
    }

    /// Replaces the reminder instant.
    #[must_use]
    pub fn with_reminder(mut self, reminder: impl Into<String>) -> Self {
        self.reminder = Some(reminder.into());
        self
    }

    /// Replaces the recipient.
    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Validates the request and parses it into a typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] when `title` or `to` is
    /// present but blank, [`TaskDomainError::InvalidFormat`] for unparseable
    /// dates and [`TaskDomainError::UnknownRecurrence`] for an unsupported
    /// recurrence label.
    pub fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let title = self
            .title
            .as_deref()
            .map(|value| non_empty("title", value).map(str::to_owned))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .map(|value| non_empty("to", value).map(str::to_owned))
            .transpose()?;
        let due_date = self.due_date.as_deref().map(parse_due_date).transpose()?;
        let reminder = self.reminder.as_deref().map(parse_reminder).transpose()?;
        let recurring = self
            .recurring
            .map(|value| Recurrence::parse_optional(value.as_deref()))
            .transpose()?;

        Ok(TaskPatch {
            title,
            description: self.description,
            due_date,
            priority: self.priority,
            status: self.status,
            recurring,
            reminder,
            to,
        })
    }
}

/// Request payload for an ad-hoc reminder that bypasses the store and the
/// scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SendReminderRequest {
    reminder: Option<String>,
    title: Option<String>,
    to: Option<String>,
}

impl SendReminderRequest {
    /// Creates a request with every field set.
    #[must_use]
    pub fn new(
        reminder: impl Into<String>,
        title: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            reminder: Some(reminder.into()),
            title: Some(title.into()),
            to: Some(to.into()),
        }
    }

    /// Creates a request carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Checks that every field is present and returns `(title, recipient)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] or
    /// [`TaskDomainError::EmptyField`] when any field is absent or blank.
    pub fn validate(&self) -> Result<(&str, &str), TaskDomainError> {
        required("reminder", self.reminder.as_deref())?;
        let title = required("title", self.title.as_deref())?;
        let to = required("to", self.to.as_deref())?;
        Ok((title, to))
    }
}
