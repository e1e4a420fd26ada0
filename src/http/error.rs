//! Mapping from service failures to JSON error responses.

use crate::task::services::TaskServiceError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

/// Error returned by HTTP handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        let status = match &err {
            TaskServiceError::Domain(_) => StatusCode::BAD_REQUEST,
            TaskServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskServiceError::Delivery(_) => StatusCode::BAD_GATEWAY,
            TaskServiceError::Repository(_) | TaskServiceError::Scheduler(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(error = %err, "request failed");
        } else {
            warn!(error = %err, "request rejected");
        }
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerError;
    use crate::task::domain::{TaskDomainError, TaskId};
    use crate::task::ports::DeliveryError;
    use rstest::rstest;

    #[rstest]
    #[case(TaskServiceError::Domain(TaskDomainError::MissingField("title")), StatusCode::BAD_REQUEST)]
    #[case(TaskServiceError::NotFound(TaskId::new(4)), StatusCode::NOT_FOUND)]
    #[case(
        TaskServiceError::Delivery(DeliveryError::Rejected { status: 400, message: "bad number".to_owned() }),
        StatusCode::BAD_GATEWAY
    )]
    #[case(
        TaskServiceError::Scheduler(SchedulerError::StatePoisoned),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn service_errors_map_to_statuses(#[case] err: TaskServiceError, #[case] expected: StatusCode) {
        let api_error = ApiError::from(err);
        assert_eq!(api_error.status(), expected);
        assert!(!api_error.message().is_empty());
    }
}
