//! Task aggregate root and its validated field set.

use super::{TaskDescription, TaskId, TaskTitle, TaskValidationError};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Drops the sub-second component of a timestamp.
///
/// Tasks store timestamps with second precision; every timestamp entering a
/// [`Task`] passes through this function.
#[must_use]
pub fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(0)
}

/// Validated mutable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: TaskTitle,
    description: Option<TaskDescription>,
    completed: bool,
}

impl TaskDetails {
    /// Creates a validated field set.
    #[must_use]
    pub const fn new(
        title: TaskTitle,
        description: Option<TaskDescription>,
        completed: bool,
    ) -> Self {
        Self {
            title,
            description,
            completed,
        }
    }

    /// Validates raw field values, collecting every failing field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] listing the title and description
    /// violations found.
    pub fn parse(
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        let parsed_description = description.map(TaskDescription::new).transpose();
        match (TaskTitle::new(title), parsed_description) {
            (Ok(valid_title), Ok(valid_description)) => {
                Ok(Self::new(valid_title, valid_description, completed))
            }
            (Err(title_err), description_result) => Err(TaskValidationError::new(
                title_err,
                description_result.err(),
            )),
            (Ok(_), Err(description_err)) => Err(TaskValidationError::from(description_err)),
        }
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }
}

/// Task aggregate root.
///
/// `id` is `None` until the task is first persisted; storage assigns it and
/// it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: Option<TaskId>,
    title: TaskTitle,
    description: Option<TaskDescription>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, not yet persisted task.
    ///
    /// Both timestamps are set to the current clock time truncated to whole
    /// seconds.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = truncate_to_seconds(clock.utc());
        let TaskDetails {
            title,
            description,
            completed,
        } = details;

        Self {
            id: None,
            title,
            description,
            completed,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let created_at = truncate_to_seconds(data.created_at);
        Self {
            id: Some(data.id),
            title: data.title,
            description: data.description,
            completed: data.completed,
            created_at,
            updated_at: truncate_to_seconds(data.updated_at).max(created_at),
        }
    }

    /// Returns this task carrying a storage-assigned identifier.
    ///
    /// An identifier that is already set is kept unchanged.
    #[must_use]
    pub fn with_assigned_id(mut self, id: TaskId) -> Self {
        self.id.get_or_insert(id);
        self
    }

    /// Returns the task identifier, if assigned.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the mutable fields and refreshes `updated_at`.
    pub fn apply(&mut self, details: TaskDetails, clock: &impl Clock) {
        self.title = details.title;
        self.description = details.description;
        self.completed = details.completed;
        self.touch(clock);
    }

    /// Sets `updated_at` to the current clock time, never earlier than
    /// `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = truncate_to_seconds(clock.utc()).max(self.created_at);
    }
}
