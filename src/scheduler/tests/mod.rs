//! Unit tests for the job scheduler.
//!
//! Time is driven by [`ManualClock`](crate::clock::ManualClock); the
//! executor tests run the background loop with a short tick.

mod support;
