//! Recurrence kinds and their fixed day intervals.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a task regenerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// One-shot task; no regeneration.
    #[default]
    None,
    /// Regenerates every day.
    Daily,
    /// Regenerates every seven days.
    Weekly,
    /// Regenerates every thirty days.
    Monthly,
}

impl Recurrence {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns the regeneration period in days, or `None` for one-shot tasks.
    #[must_use]
    pub const fn interval_days(self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Daily => Some(1),
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
        }
    }

    /// Returns `true` when the task regenerates.
    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Parses an optional wire value; `None`, empty strings and `"none"`
    /// all mean a one-shot task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownRecurrence`] for any other value.
    pub fn parse_optional(value: Option<&str>) -> Result<Self, TaskDomainError> {
        value.map_or(Ok(Self::None), Self::try_from)
    }

    /// Returns the wire representation, with one-shot tasks rendered as
    /// `None` (JSON `null`).
    #[must_use]
    pub const fn to_optional_str(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            other => Some(other.as_str()),
        }
    }
}

impl TryFrom<&str> for Recurrence {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(TaskDomainError::UnknownRecurrence(value.to_owned())),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
