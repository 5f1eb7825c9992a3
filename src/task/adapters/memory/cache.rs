//! Process-local task cache with independent by-id and by-page regions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PageKey, Task, TaskId},
    ports::{CacheGeneration, CacheRegion, TaskCache, TaskCacheError, TaskCacheResult},
};

/// Thread-safe in-memory task cache.
///
/// Clones share the same underlying regions, so one instance can be handed
/// to every request. The generation check and the insert happen under the
/// same write lock as flushes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCache {
    state: Arc<RwLock<CacheState>>,
}

#[derive(Debug, Default)]
struct CacheState {
    generation: CacheGeneration,
    by_id: HashMap<TaskId, Task>,
    by_page: HashMap<PageKey, Vec<Task>>,
}

impl InMemoryTaskCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries held in `region`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCacheError::Unavailable`] when the cache lock is
    /// poisoned.
    pub fn entry_count(&self, region: CacheRegion) -> TaskCacheResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(match region {
            CacheRegion::ById => state.by_id.len(),
            CacheRegion::ByPage => state.by_page.len(),
        })
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskCacheError {
    TaskCacheError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskCache for InMemoryTaskCache {
    async fn generation(&self) -> TaskCacheResult<CacheGeneration> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.generation)
    }

    async fn get_task(&self, id: TaskId) -> TaskCacheResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.by_id.get(&id).cloned())
    }

    async fn put_task(&self, task: &Task, observed: CacheGeneration) -> TaskCacheResult<bool> {
        let id = task.id().ok_or(TaskCacheError::MissingIdentity)?;
        let mut state = self.state.write().map_err(lock_error)?;
        if state.generation != observed {
            return Ok(false);
        }
        state.by_id.insert(id, task.clone());
        Ok(true)
    }

    async fn get_page(&self, key: PageKey) -> TaskCacheResult<Option<Vec<Task>>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.by_page.get(&key).cloned())
    }

    async fn put_page(
        &self,
        key: PageKey,
        tasks: &[Task],
        observed: CacheGeneration,
    ) -> TaskCacheResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.generation != observed {
            return Ok(false);
        }
        state.by_page.insert(key, tasks.to_vec());
        Ok(true)
    }

    async fn flush(&self, region: CacheRegion) -> TaskCacheResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        match region {
            CacheRegion::ById => state.by_id.clear(),
            CacheRegion::ByPage => state.by_page.clear(),
        }
        state.generation = state.generation.next();
        Ok(())
    }
}
