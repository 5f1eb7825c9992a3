//! Domain model for task management.
//!
//! The task domain owns field validation, timestamp precision, and the
//! offset/limit to page translation while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod page;
mod task;

pub use error::{FieldViolation, TaskDomainError, TaskValidationError};
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use page::{PageKey, PageRequest};
pub use task::{PersistedTaskData, Task, TaskDetails, truncate_to_seconds};
