//! Task service: read-through caching in front of the task repository.

use super::error::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{PageRequest, Task, TaskDetails, TaskId, TaskValidationError},
    ports::{CacheGeneration, CacheRegion, TaskCache, TaskCacheResult, TaskRepository},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

impl TaskInput {
    /// Creates an input with the given title, no description, not completed.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Validates the payload into domain fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing every rejected field.
    pub fn validate(&self) -> Result<TaskDetails, TaskValidationError> {
        TaskDetails::parse(&self.title, self.description.as_deref(), self.completed)
    }
}

/// Task CRUD orchestration service.
///
/// Reads go through the cache; every successful mutation flushes both cache
/// regions after the repository write has committed. A read only fills the
/// cache if no flush happened between its cache miss and its repository
/// fetch returning. A failing cache is logged and bypassed.
#[derive(Clone)]
pub struct TaskService<R, K, C>
where
    R: TaskRepository,
    K: TaskCache,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    cache: Arc<K>,
    clock: Arc<C>,
}

impl<R, K, C> TaskService<R, K, C>
where
    R: TaskRepository,
    K: TaskCache,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, cache: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            repository,
            cache,
            clock,
        }
    }

    /// Lists tasks newest first, paged by `limit` and `offset`.
    ///
    /// The storage page is `offset / limit`; see [`PageRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when `limit` is zero and
    /// [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn list(&self, limit: u32, offset: u32) -> TaskServiceResult<Vec<Task>> {
        let page = PageRequest::new(limit, offset).map_err(TaskValidationError::from)?;
        self.list_page(page).await
    }

    /// Lists one page of tasks newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn list_page(&self, page: PageRequest) -> TaskServiceResult<Vec<Task>> {
        let key = page.cache_key();
        if let Some(tasks) = cache_hit(self.cache.get_page(key).await, CacheRegion::ByPage) {
            debug!(%key, "task page served from cache");
            return Ok(tasks);
        }

        debug!(
            %key,
            page_number = page.page_number(),
            page_size = page.page_size(),
            "task page cache miss"
        );
        let observed = self.observe_generation().await;
        let tasks = self.repository.find_page(page).await?;
        if let Some(generation) = observed {
            log_fill(
                self.cache.put_page(key, &tasks, generation).await,
                CacheRegion::ByPage,
            );
        }
        Ok(tasks)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the identifier
    /// and [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        if let Some(task) = cache_hit(self.cache.get_task(id).await, CacheRegion::ById) {
            debug!(task_id = %id, "task served from cache");
            return Ok(task);
        }

        let observed = self.observe_generation().await;
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if let Some(generation) = observed {
            log_fill(
                self.cache.put_task(&task, generation).await,
                CacheRegion::ById,
            );
        }
        Ok(task)
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid input and
    /// [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn create(&self, input: TaskInput) -> TaskServiceResult<Task> {
        let details = input.validate()?;
        let task = Task::new(details, &*self.clock);
        let created = self.repository.save(&task).await?;
        self.invalidate().await;
        info!(task_id = ?created.id(), "task created");
        Ok(created)
    }

    /// Replaces the title, description and completion flag of a task.
    ///
    /// The current state is always read from the repository, never from the
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid input,
    /// [`TaskServiceError::NotFound`] when the task does not exist, and
    /// [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn update(&self, id: TaskId, input: TaskInput) -> TaskServiceResult<Task> {
        let details = input.validate()?;
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        task.apply(details, &*self.clock);
        let updated = self.repository.save(&task).await?;
        self.invalidate().await;
        info!(task_id = %id, "task updated");
        Ok(updated)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::Persistence`] when the repository fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        self.repository.delete_by_id(id).await?;
        self.invalidate().await;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Flushes both cache regions. Any insertion, update or deletion can
    /// shift the contents of every cached page.
    async fn invalidate(&self) {
        for region in CacheRegion::ALL {
            if let Err(err) = self.cache.flush(region).await {
                warn!(%region, error = %err, "cache flush failed");
            }
        }
    }

    /// Snapshots the flush generation ahead of a repository read. `None`
    /// disables the fill for this read.
    async fn observe_generation(&self) -> Option<CacheGeneration> {
        self.cache
            .generation()
            .await
            .inspect_err(|err| warn!(error = %err, "cache generation unavailable, skipping fill"))
            .ok()
    }
}

fn cache_hit<T>(result: TaskCacheResult<Option<T>>, region: CacheRegion) -> Option<T> {
    match result {
        Ok(entry) => entry,
        Err(err) => {
            warn!(%region, error = %err, "cache read failed, falling back to repository");
            None
        }
    }
}

fn log_fill(result: TaskCacheResult<bool>, region: CacheRegion) {
    match result {
        Ok(true) => {}
        Ok(false) => debug!(%region, "cache flushed during fetch, fill dropped"),
        Err(err) => warn!(%region, error = %err, "cache write failed"),
    }
}
