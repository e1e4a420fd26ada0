//! Then steps for recurring task BDD scenarios.

use super::world::{RECIPIENT, TaskRecurrenceWorld, run_async};
use rstest_bdd_macros::then;
use tickler::scheduler::JobKind;

#[then("the task has {count:usize} interval job every {days:u32} days")]
fn interval_jobs_with_period(
    world: &TaskRecurrenceWorld,
    count: usize,
    days: u32,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let jobs = world
        .service
        .scheduler()
        .jobs_for_owner(task_id, JobKind::Interval)?;

    if jobs.len() != count {
        return Err(eyre::eyre!("expected {count} interval jobs, found {jobs:?}"));
    }
    if jobs.iter().any(|job| job.period_days != Some(days)) {
        return Err(eyre::eyre!("expected a {days}-day period, found {jobs:?}"));
    }
    Ok(())
}

#[then("the task has no interval jobs")]
fn no_interval_jobs(world: &TaskRecurrenceWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let jobs = world
        .service
        .scheduler()
        .jobs_for_owner(task_id, JobKind::Interval)?;

    if !jobs.is_empty() {
        return Err(eyre::eyre!("expected no interval jobs, found {jobs:?}"));
    }
    Ok(())
}

#[then(r#"{count:usize} reminder reading "{body}" was sent"#)]
fn reminders_sent(world: &TaskRecurrenceWorld, count: usize, body: String) -> Result<(), eyre::Report> {
    let sent = world.notifier.sent();
    let matching = sent
        .iter()
        .filter(|message| message.body == body && message.recipient == RECIPIENT)
        .count();

    if matching != count || sent.len() != count {
        return Err(eyre::eyre!("expected {count} reminders reading {body:?}, found {sent:?}"));
    }
    Ok(())
}

#[then(r#"{count:usize} tasks titled "{title}" are stored"#)]
fn tasks_stored(world: &TaskRecurrenceWorld, count: usize, title: String) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_tasks())?;
    let matching = tasks.iter().filter(|task| task.title() == title).count();

    if matching != count {
        return Err(eyre::eyre!("expected {count} tasks titled {title:?}, found {tasks:?}"));
    }
    Ok(())
}
