//! Shared world state for task CRUD BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::task::{
    adapters::memory::{InMemoryTaskCache, InMemoryTaskRepository},
    domain::{Task, TaskId},
    services::{TaskInput, TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, InMemoryTaskCache, DefaultClock>;

/// Scenario world for task CRUD behaviour tests.
pub struct TaskWorld {
    pub service: TestTaskService,
    pub pending_input: Option<TaskInput>,
    pub existing_id: Option<TaskId>,
    pub last_task_result: Option<Result<Task, TaskServiceError>>,
    pub last_list_result: Option<Result<Vec<Task>, TaskServiceError>>,
    pub last_delete_result: Option<Result<(), TaskServiceError>>,
}

impl TaskWorld {
    /// Creates a world over empty in-memory storage and cache.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryTaskCache::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            pending_input: None,
            existing_id: None,
            last_task_result: None,
            last_list_result: None,
            last_delete_result: None,
        }
    }

    /// Returns the identifier recorded by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error when no step has recorded an existing task.
    pub fn existing_id(&self) -> eyre::Result<TaskId> {
        self.existing_id
            .ok_or_else(|| eyre::eyre!("missing existing task in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
