//! Application services for task management.

mod error;
mod task_service;

pub use error::{ErrorResponse, TaskErrorKind, TaskServiceError, TaskServiceResult};
pub use task_service::{TaskInput, TaskService};
