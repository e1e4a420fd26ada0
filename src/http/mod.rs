//! JSON HTTP surface over [`TaskReminderService`].
//!
//! | Route                 | Success                          |
//! |-----------------------|----------------------------------|
//! | `POST /tasks`         | 201, created task                |
//! | `GET /tasks`          | 200, every task                  |
//! | `PUT /tasks/{id}`     | 200, updated task                |
//! | `DELETE /tasks/{id}`  | 204                              |
//! | `POST /send-reminder` | 200, `{"message", "sid"}`        |
//!
//! Failures are rendered by [`ApiError`].

mod error;

pub use error::ApiError;

use crate::task::{
    domain::{TaskId, TaskView},
    ports::{NotificationSink, TaskRepository},
    services::{CreateTaskRequest, SendReminderRequest, TaskReminderService, UpdateTaskRequest},
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Body returned by `POST /send-reminder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSent {
    /// Fixed confirmation text.
    pub message: String,
    /// Provider delivery identifier.
    pub sid: String,
}

type ApiResult<T> = Result<T, ApiError>;

/// Builds the router for the reminder service.
pub fn router<R, N, C>(service: TaskReminderService<R, N, C>) -> Router
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            post(create_task::<R, N, C>).get(list_tasks::<R, N, C>),
        )
        .route(
            "/tasks/{id}",
            put(update_task::<R, N, C>).delete(delete_task::<R, N, C>),
        )
        .route("/send-reminder", post(send_reminder::<R, N, C>))
        .with_state(service)
}

async fn create_task<R, N, C>(
    State(service): State<TaskReminderService<R, N, C>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskView>)>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = body?;
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task.view())))
}

async fn list_tasks<R, N, C>(
    State(service): State<TaskReminderService<R, N, C>>,
) -> ApiResult<Json<Vec<TaskView>>>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks.iter().map(|task| task.view()).collect()))
}

async fn update_task<R, N, C>(
    State(service): State<TaskReminderService<R, N, C>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskView>>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Path(raw_id) = id?;
    let Json(request) = body?;
    let task = service.update_task(TaskId::new(raw_id), request).await?;
    Ok(Json(task.view()))
}

async fn delete_task<R, N, C>(
    State(service): State<TaskReminderService<R, N, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Path(raw_id) = id?;
    service.delete_task(TaskId::new(raw_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn send_reminder<R, N, C>(
    State(service): State<TaskReminderService<R, N, C>>,
    body: Result<Json<SendReminderRequest>, JsonRejection>,
) -> ApiResult<Json<ReminderSent>>
where
    R: TaskRepository + 'static,
    N: NotificationSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = body?;
    let delivery_id = service.send_reminder_now(request).await?;
    Ok(Json(ReminderSent {
        message: "Reminder sent".to_owned(),
        sid: delivery_id.as_str().to_owned(),
    }))
}
