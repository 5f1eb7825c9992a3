//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by the task service:
//! the persistence gateway and the cache layer.

pub mod cache;
pub mod repository;

pub use cache::{CacheGeneration, CacheRegion, TaskCache, TaskCacheError, TaskCacheResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
