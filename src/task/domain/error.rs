//! Error types for task domain validation.

use std::fmt;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty or whitespace-only.
    #[error("task title must not be blank")]
    BlankTitle,

    /// The task title exceeds the maximum length.
    #[error("task title has {length} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// Length of the rejected title in code points.
        length: usize,
        /// Maximum accepted length in code points.
        max: usize,
    },

    /// The task description exceeds the maximum length.
    #[error("task description has {length} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// Length of the rejected description in code points.
        length: usize,
        /// Maximum accepted length in code points.
        max: usize,
    },

    /// The requested page size is zero.
    #[error("page limit must be greater than zero")]
    ZeroPageLimit,
}

impl TaskDomainError {
    /// Returns the name of the input field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::ZeroPageLimit => "limit",
        }
    }

    /// Returns the violated constraint phrased relative to its field.
    #[must_use]
    pub fn constraint(&self) -> String {
        match self {
            Self::BlankTitle => "must not be blank".to_owned(),
            Self::TitleTooLong { max, .. } | Self::DescriptionTooLong { max, .. } => {
                format!("size must be between 0 and {max}")
            }
            Self::ZeroPageLimit => "must be greater than 0".to_owned(),
        }
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: &'static str,
    message: String,
}

impl FieldViolation {
    /// Returns the rejected field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the constraint message for the field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&TaskDomainError> for FieldViolation {
    fn from(err: &TaskDomainError) -> Self {
        Self {
            field: err.field(),
            message: err.constraint(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input validation failure carrying every rejected field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {}", render_violations(.violations))]
pub struct TaskValidationError {
    violations: Vec<FieldViolation>,
}

impl TaskValidationError {
    /// Builds a validation error from one or more domain failures.
    #[must_use]
    pub fn new(first: TaskDomainError, rest: impl IntoIterator<Item = TaskDomainError>) -> Self {
        let violations = std::iter::once(first)
            .chain(rest)
            .map(|err| FieldViolation::from(&err))
            .collect();
        Self { violations }
    }

    /// Returns the rejected fields in the order they were checked.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns `true` when the given field was rejected.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl From<TaskDomainError> for TaskValidationError {
    fn from(err: TaskDomainError) -> Self {
        Self::new(err, None::<TaskDomainError>)
    }
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
