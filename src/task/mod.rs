//! Reminder task management.
//!
//! Clients create tasks with a due date, an optional recurrence and a
//! reminder instant. The service persists them and schedules two kinds of
//! jobs: a one-shot job that sends an SMS reminder, and for recurring tasks
//! an interval job that inserts a fresh copy of the task every period. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
