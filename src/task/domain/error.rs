//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required field was not supplied.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required field was supplied but is empty after trimming.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// The recurrence value is not one of the supported kinds.
    #[error("unsupported recurrence '{0}', expected daily, weekly, monthly or none")]
    UnknownRecurrence(String),

    /// A date or date-time string could not be parsed.
    #[error("invalid format for '{field}': '{value}'")]
    InvalidFormat {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value as received.
        value: String,
    },
}

impl TaskDomainError {
    /// Returns `true` for format errors (unparseable date strings).
    #[must_use]
    pub const fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}
