//! When steps for recurring task BDD scenarios.

use super::world::{TaskRecurrenceWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tickler::task::services::UpdateTaskRequest;

#[when("the task is created")]
fn create_task(world: &mut TaskRecurrenceWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let created = run_async(world.service.create_task(request)).wrap_err("create task")?;
    world.task = Some(created);
    Ok(())
}

#[when(r#"the task recurrence is changed to "{recurring}""#)]
fn change_recurrence(world: &mut TaskRecurrenceWorld, recurring: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let updated = run_async(
        world
            .service
            .update_task(task_id, UpdateTaskRequest::new().with_recurring(recurring)),
    )
    .wrap_err("update task recurrence")?;
    world.task = Some(updated);
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskRecurrenceWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.service.delete_task(task_id)).wrap_err("delete task")?;
    Ok(())
}

#[when("the clock reaches the reminder time")]
fn clock_reaches_reminder(world: &mut TaskRecurrenceWorld) -> Result<(), eyre::Report> {
    let reminder = world.task()?.reminder();
    world.clock.set(reminder);
    Ok(())
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut TaskRecurrenceWorld, days: i64) {
    world.clock.advance(Duration::days(days));
}

#[when("the scheduler runs {times:usize} times")]
fn scheduler_runs(world: &mut TaskRecurrenceWorld, times: usize) -> Result<(), eyre::Report> {
    for _ in 0..times {
        run_async(world.service.scheduler().run_pending(&world.handler))
            .wrap_err("run pending jobs")?;
    }
    Ok(())
}
