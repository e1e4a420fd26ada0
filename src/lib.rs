//! Tickler: task reminders delivered by SMS.
//!
//! Tasks carry a due date, a reminder instant and an optional recurrence.
//! Creating a task schedules a one-shot reminder job and, for recurring
//! tasks, an interval job that inserts a fresh copy of the task every period.
//!
//! # Architecture
//!
//! Tickler follows hexagonal architecture principles:
//!
//! - **Domain**: Task values, recurrence and date handling
//! - **Ports**: Abstract task store and notification sink
//! - **Adapters**: In-memory, `PostgreSQL` and Twilio implementations
//!
//! # Modules
//!
//! - [`task`]: Task model, ports, adapters and the reminder service
//! - [`scheduler`]: In-process job scheduler with a background executor
//! - [`http`]: JSON surface over the reminder service
//! - [`config`]: Layered configuration
//! - [`clock`]: Settable clock for deterministic scheduling

pub mod clock;
pub mod config;
pub mod http;
pub mod scheduler;
pub mod task;
