//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain values and date handling, request
//! validation, the job handler and the reminder service.
