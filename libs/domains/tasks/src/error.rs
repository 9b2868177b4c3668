use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Task domain errors
///
/// Every failure of a facade operation is one of these three kinds.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Malformed identifier or an update with nothing to write
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    /// The store failed, could not decode, or missed its deadline
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Errors raised by a store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The insert outcome carried an `_id` that is not an ObjectId
    #[error("Unexpected inserted id: {0}")]
    UnexpectedId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            TaskError::NotFound(_) => AppError::NotFound("Task not found".to_string()),
            TaskError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
