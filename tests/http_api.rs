//! End-to-end tests for the HTTP surface.
//!
//! Each test serves the router on an ephemeral port with in-memory adapters
//! and drives it with `reqwest`.

use std::sync::Arc;

use eyre::{Result, WrapErr, ensure};
use mockable::DefaultClock;
use reqwest::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tickler::http::{ReminderSent, router};
use tickler::scheduler::JobKind;
use tickler::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingNotificationSink},
    domain::{TaskId, TaskView},
    services::{TaskReminderService, TaskScheduler},
};

type TestService = TaskReminderService<InMemoryTaskRepository, RecordingNotificationSink, DefaultClock>;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    service: TestService,
    notifier: RecordingNotificationSink,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn create(&self, body: &Value) -> Result<TaskView> {
        let response = self.client.post(self.url("/tasks")).json(body).send().await?;
        ensure!(
            response.status() == StatusCode::CREATED,
            "unexpected status {}",
            response.status()
        );
        response.json().await.wrap_err("decode created task")
    }
}

#[fixture]
fn notifier() -> RecordingNotificationSink {
    RecordingNotificationSink::new()
}

async fn spawn_app(notifier: RecordingNotificationSink) -> Result<TestApp> {
    let scheduler = Arc::new(TaskScheduler::new(Arc::new(DefaultClock)));
    let service = TaskReminderService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(notifier.clone()),
        scheduler,
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(service.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        service,
        notifier,
    })
}

fn weekly_task() -> Value {
    json!({
        "title": "Clean gutters",
        "description": "Front and back",
        "dueDate": "2030-10-20",
        "priority": "low",
        "recurring": "weekly",
        "reminder": "2030-10-19T09:00:00Z",
        "to": "+15550120"
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_list_returns_the_task(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let created = app.create(&weekly_task()).await?;
    let listed: Vec<TaskView> = app
        .client
        .get(app.url("/tasks"))
        .send()
        .await?
        .json()
        .await?;

    ensure!(listed == vec![created.clone()], "list mismatch: {listed:?}");
    ensure!(created.due_date == "2030-10-20");
    ensure!(created.reminder == "2030-10-19T09:00:00Z");
    ensure!(created.recurring.as_deref() == Some("weekly"));
    ensure!(created.status == "pending");
    let jobs = app
        .service
        .scheduler()
        .jobs_for_owner(created.id, JobKind::Interval)?;
    ensure!(jobs.len() == 1, "expected one interval job, found {jobs:?}");
    Ok(())
}

#[rstest]
#[case(json!({"dueDate": "2030-10-20", "reminder": "2030-10-19", "to": "+1"}), "title")]
#[case(json!({"title": "x", "dueDate": "20/10/2030", "reminder": "2030-10-19", "to": "+1"}), "dueDate")]
#[case(json!({"title": "x", "dueDate": "2030-10-20", "reminder": "2030-10-19", "to": "+1", "recurring": "hourly"}), "hourly")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_is_a_bad_request(
    notifier: RecordingNotificationSink,
    #[case] body: Value,
    #[case] mentioned: &str,
) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app.client.post(app.url("/tasks")).json(&body).send().await?;

    ensure!(response.status() == StatusCode::BAD_REQUEST);
    let error: Value = response.json().await?;
    let message = error["error"].as_str().unwrap_or_default();
    ensure!(message.contains(mentioned), "unexpected error body {error}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_a_bad_request(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .post(app.url("/tasks"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"title\": ")
        .send()
        .await?;

    ensure!(response.status() == StatusCode::BAD_REQUEST);
    let error: Value = response.json().await?;
    ensure!(error["error"].is_string());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_fields_and_recurrence(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;
    let created = app.create(&weekly_task()).await?;

    let response = app
        .client
        .put(app.url(&format!("/tasks/{}", created.id)))
        .json(&json!({"status": "done", "recurring": null, "description": null}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::OK);
    let updated: TaskView = response.json().await?;
    ensure!(updated.status == "done");
    ensure!(updated.recurring.is_none());
    ensure!(updated.description.is_none());
    ensure!(updated.title == created.title);
    let jobs = app
        .service
        .scheduler()
        .jobs_for_owner(created.id, JobKind::Interval)?;
    ensure!(jobs.is_empty(), "interval job survived: {jobs:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .put(app.url("/tasks/404"))
        .json(&json!({"status": "done"}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::NOT_FOUND);
    let error: Value = response.json().await?;
    ensure!(error["error"].is_string());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_id_is_a_bad_request(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .put(app.url("/tasks/abc"))
        .json(&json!({"status": "done"}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_no_content_and_keeps_jobs(
    notifier: RecordingNotificationSink,
) -> Result<()> {
    let app = spawn_app(notifier).await?;
    let created = app.create(&weekly_task()).await?;
    let path = app.url(&format!("/tasks/{}", created.id));

    for _ in 0..2 {
        let response = app.client.delete(&path).send().await?;
        ensure!(response.status() == StatusCode::NO_CONTENT);
    }

    let listed: Vec<TaskView> = app.client.get(app.url("/tasks")).send().await?.json().await?;
    ensure!(listed.is_empty());
    let jobs = app
        .service
        .scheduler()
        .jobs_for_owner(created.id, JobKind::Interval)?;
    ensure!(jobs.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn send_reminder_delivers_immediately(notifier: RecordingNotificationSink) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .post(app.url("/send-reminder"))
        .json(&json!({"reminder": "2030-10-19", "title": "Call bank", "to": "+15550121"}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::OK);
    let body: ReminderSent = response.json().await?;
    ensure!(body.message == "Reminder sent");
    let sent = app.notifier.sent();
    ensure!(sent.len() == 1);
    ensure!(sent.iter().all(|message| {
        message.delivery_id.as_str() == body.sid && message.body == "Reminder: Call bank"
    }));
    ensure!(app.service.get_task(TaskId::new(1)).await.is_err());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn send_reminder_with_missing_field_is_a_bad_request(
    notifier: RecordingNotificationSink,
) -> Result<()> {
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .post(app.url("/send-reminder"))
        .json(&json!({"title": "Call bank", "to": "+15550121"}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::BAD_REQUEST);
    ensure!(app.notifier.sent().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn send_reminder_delivery_failure_is_a_bad_gateway(
    notifier: RecordingNotificationSink,
) -> Result<()> {
    notifier.set_failing(true);
    let app = spawn_app(notifier).await?;

    let response = app
        .client
        .post(app.url("/send-reminder"))
        .json(&json!({"reminder": "2030-10-19", "title": "Call bank", "to": "+15550121"}))
        .send()
        .await?;

    ensure!(response.status() == StatusCode::BAD_GATEWAY);
    let error: Value = response.json().await?;
    ensure!(error["error"].is_string());
    Ok(())
}
