//! In-memory adapters for the task ports.

mod cache;
mod task;

pub use cache::InMemoryTaskCache;
pub use task::InMemoryTaskRepository;
