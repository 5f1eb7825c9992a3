//! Repository port for task persistence and paged lookup.

use crate::task::domain::{PageRequest, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Mutating operations are atomic: a task is either fully written or left
/// untouched.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns one storage page of tasks ordered by creation time, newest
    /// first. Tasks created in the same second are ordered by identifier,
    /// highest first.
    async fn find_page(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns `true` when a task with the identifier exists.
    async fn exists_by_id(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Stores a new task and returns it with its storage-assigned identifier.
    ///
    /// Any identifier already present on `task` is ignored by storage.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Overwrites the mutable fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::MissingIdentity`] when the task has no
    /// identifier and [`TaskRepositoryError::NotFound`] when no row matches.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Deletes a task. Deleting an absent task is a no-op.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Inserts a task without an identifier, updates one with an identifier.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        if task.id().is_some() {
            self.update(task).await
        } else {
            self.insert(task).await
        }
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// An update was requested for a task that was never persisted.
    #[error("task has no storage identifier")]
    MissingIdentity,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
