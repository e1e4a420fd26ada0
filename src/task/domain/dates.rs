//! Boundary parsing and formatting for task dates.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses a `YYYY-MM-DD` due date.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidFormat`] when the value is not a
/// calendar date in that form.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskDomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        TaskDomainError::InvalidFormat {
            field: "dueDate",
            value: value.to_owned(),
        }
    })
}

/// Parses a reminder instant.
///
/// Accepts `YYYY-MM-DD` (UTC midnight), RFC 3339, or a zone-less
/// `YYYY-MM-DDTHH:MM[:SS]` read as UTC.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidFormat`] when none of the accepted forms
/// match.
pub fn parse_reminder(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidFormat {
            field: "reminder",
            value: value.to_owned(),
        })
}

/// Formats a due date as `YYYY-MM-DD`.
#[must_use]
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a reminder so that [`parse_reminder`] returns the same instant.
///
/// Midnight reminders use the short date form; anything else is RFC 3339.
#[must_use]
pub fn format_reminder(reminder: DateTime<Utc>) -> String {
    if reminder.time() == NaiveTime::MIN {
        reminder.format(DATE_FORMAT).to_string()
    } else {
        reminder.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
    }
}
