//! Service-level error taxonomy and its transport-neutral rendering.

use crate::task::{
    domain::{TaskId, TaskValidationError},
    ports::TaskRepositoryError,
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by [`super::TaskService`] operations.
///
/// Cache failures never appear here; the service degrades to the
/// repository instead.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// Input failed field validation and never reached storage.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// No task exists with the requested identifier.
    #[error("Task not found with id: {0}")]
    NotFound(TaskId),

    /// The storage operation failed; any transaction was rolled back.
    #[error(transparent)]
    Persistence(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Coarse error class a transport adapter maps onto its status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// The caller sent invalid input.
    InvalidInput,
    /// The addressed task does not exist.
    NotFound,
    /// The service failed internally.
    Internal,
}

impl TaskErrorKind {
    /// Returns the matching HTTP status code.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl TaskServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Validation(_) => TaskErrorKind::InvalidInput,
            Self::NotFound(_) => TaskErrorKind::NotFound,
            Self::Persistence(_) => TaskErrorKind::Internal,
        }
    }
}

/// Serializable error body for transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable summary.
    pub message: String,
    /// Per-field messages formatted as `"field: message"`, for validation
    /// failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<&TaskServiceError> for ErrorResponse {
    fn from(err: &TaskServiceError) -> Self {
        let status = err.kind().status_code();
        match err {
            TaskServiceError::Validation(validation) => Self {
                status,
                message: "Validation error".to_owned(),
                errors: Some(
                    validation
                        .violations()
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                ),
            },
            TaskServiceError::NotFound(_) => Self {
                status,
                message: err.to_string(),
                errors: None,
            },
            TaskServiceError::Persistence(source) => Self {
                status,
                message: format!("An unexpected error occurred: {source}"),
                errors: None,
            },
        }
    }
}
