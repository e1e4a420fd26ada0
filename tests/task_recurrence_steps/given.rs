//! Given steps for recurring task BDD scenarios.

use super::world::{RECIPIENT, TaskRecurrenceWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tickler::task::services::CreateTaskRequest;

#[given(r#"a task titled "{title}" recurring "{recurring}""#)]
fn task_with_recurrence(world: &mut TaskRecurrenceWorld, title: String, recurring: String) {
    let request = CreateTaskRequest::new(title, "2026-04-03", "2026-04-02T07:30:00Z", RECIPIENT)
        .with_recurring(recurring);
    world.pending_request = Some(request);
}

#[given("the task has been created")]
fn task_has_been_created(world: &mut TaskRecurrenceWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let created = run_async(world.service.create_task(request))
        .wrap_err("create task for recurrence scenario")?;
    world.task = Some(created);
    Ok(())
}
