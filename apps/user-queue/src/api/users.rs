use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Instant;

use super::AppState;
use crate::users::{self, ReadError, User, WriteError};

pub async fn write_user(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let start = Instant::now();

    match users::write(&state.connector, &state.queue_name).await {
        Ok(user) => {
            state.metrics.users_written_total.inc();
            state.metrics.record_success("write", start.elapsed().as_secs_f64());
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => {
            state
                .metrics
                .record_failure("write", e.error_type(), start.elapsed().as_secs_f64());
            Err(e.into())
        }
    }
}

pub async fn read_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let start = Instant::now();

    match users::read(&state.connector, &state.queue_name).await {
        Ok(users) => {
            state.metrics.users_read_total.inc_by(users.len() as f64);
            state.metrics.record_success("read", start.elapsed().as_secs_f64());
            Ok(Json(users))
        }
        Err(e) => {
            state
                .metrics
                .record_failure("read", e.error_type(), start.elapsed().as_secs_f64());
            Err(e.into())
        }
    }
}

/// An operation failure rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        let status = match err {
            WriteError::Generation(_) | WriteError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WriteError::Connection(_) | WriteError::Channel(_) | WriteError::Publish(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ReadError> for ApiError {
    fn from(err: ReadError) -> Self {
        let status = match err {
            ReadError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ReadError::Connection(_) | ReadError::Channel(_) | ReadError::Fetch(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
