//! In-memory task repository for tests and embedded use.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PageRequest, PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a monotonically increasing counter starting
/// at 1, mirroring a database sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn storage_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn clamp_to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_page(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(storage_error)?;
        let mut ordered: Vec<&Task> = state.tasks.values().collect();
        ordered.sort_by_key(|task| Reverse((task.created_at(), task.id())));

        Ok(ordered
            .into_iter()
            .skip(clamp_to_usize(page.first_row()))
            .take(clamp_to_usize(u64::from(page.page_size())))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(storage_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let state = self.state.read().map_err(storage_error)?;
        Ok(state.tasks.contains_key(&id))
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(storage_error)?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| storage_error("task identifier sequence exhausted"))?;
        state.last_id = next_id;

        let id = TaskId::new(next_id);
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().clone(),
            description: task.description().cloned(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        });
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let id = task.id().ok_or(TaskRepositoryError::MissingIdentity)?;
        let mut state = self.state.write().map_err(storage_error)?;
        let existing = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        // Creation time is owned by storage and never rewritten.
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().clone(),
            description: task.description().cloned(),
            completed: task.completed(),
            created_at: existing.created_at(),
            updated_at: task.updated_at(),
        });
        *existing = stored.clone();
        Ok(stored)
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(storage_error)?;
        state.tasks.remove(&id);
        Ok(())
    }
}
