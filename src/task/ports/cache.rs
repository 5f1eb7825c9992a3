//! Cache port holding disposable copies of persisted tasks.

use crate::task::domain::{PageKey, Task, TaskId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task cache operations.
pub type TaskCacheResult<T> = Result<T, TaskCacheError>;

/// Independent key spaces within the task cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRegion {
    /// Single tasks keyed by identifier.
    ById,
    /// Listed pages keyed by `(limit, offset)`.
    ByPage,
}

impl CacheRegion {
    /// All regions, in flush order.
    pub const ALL: [Self; 2] = [Self::ById, Self::ByPage];

    /// Returns the region name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ById => "by_id",
            Self::ByPage => "by_page",
        }
    }
}

impl fmt::Display for CacheRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flush counter observed before a repository read.
///
/// A put carrying an older generation than the cache's current one is
/// dropped, since a flush happened while the value was being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CacheGeneration(u64);

impl CacheGeneration {
    /// Wraps a raw counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the generation following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Task cache contract.
///
/// Entries never expire on their own; they are removed only by
/// [`TaskCache::flush`], which also advances the [`CacheGeneration`].
#[async_trait]
pub trait TaskCache: Send + Sync {
    /// Returns the current flush generation.
    async fn generation(&self) -> TaskCacheResult<CacheGeneration>;

    /// Returns the cached task for `id`, if any.
    async fn get_task(&self, id: TaskId) -> TaskCacheResult<Option<Task>>;

    /// Caches a persisted task under its identifier, unless the cache was
    /// flushed since `observed`. Returns whether the entry was stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCacheError::MissingIdentity`] when the task has not been
    /// persisted.
    async fn put_task(&self, task: &Task, observed: CacheGeneration) -> TaskCacheResult<bool>;

    /// Returns the cached page for `key`, if any.
    async fn get_page(&self, key: PageKey) -> TaskCacheResult<Option<Vec<Task>>>;

    /// Caches a listed page, unless the cache was flushed since `observed`.
    /// Returns whether the entry was stored.
    async fn put_page(
        &self,
        key: PageKey,
        tasks: &[Task],
        observed: CacheGeneration,
    ) -> TaskCacheResult<bool>;

    /// Removes every entry in `region` and advances the generation.
    async fn flush(&self, region: CacheRegion) -> TaskCacheResult<()>;

    /// Removes every entry in every region.
    async fn flush_all(&self) -> TaskCacheResult<()> {
        for region in CacheRegion::ALL {
            self.flush(region).await?;
        }
        Ok(())
    }
}

/// Errors returned by task cache implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskCacheError {
    /// The task has no identifier to key it by.
    #[error("cannot cache a task without a storage identifier")]
    MissingIdentity,

    /// The cache backend could not serve the request.
    #[error("cache unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskCacheError {
    /// Wraps a backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
