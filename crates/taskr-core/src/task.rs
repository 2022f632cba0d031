use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::priority::Priority;

/// A single to-do item.
///
/// Ids are assigned by [`TaskManager`](crate::TaskManager) and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique, positive identifier
    pub id: u64,
    /// Free-form text. Must not contain a comma to survive a save/load cycle.
    pub description: String,
    /// Due date as entered; never interpreted as a calendar date
    pub due_date: Option<String>,
    /// Whether the task has been completed
    pub completed: bool,
    /// How urgent the task is
    pub priority: Priority,
}

impl Task {
    /// Creates an open task.
    ///
    /// `priority` is matched case-insensitively against `low`, `medium` and
    /// `high`; an empty string means `medium`. Anything else is rejected with
    /// [`TaskError::InvalidPriority`].
    pub fn new(
        id: u64,
        description: impl Into<String>,
        due_date: Option<String>,
        priority: &str,
    ) -> Result<Self, TaskError> {
        let priority = if priority.is_empty() {
            Priority::default()
        } else {
            priority.parse()?
        };

        Ok(Self {
            id,
            description: description.into(),
            due_date,
            completed: false,
            priority,
        })
    }

    /// Marks the task as completed. Calling it again changes nothing.
    pub fn mark_completed(&mut self) {
        self.completed = true;
        info!("Task {} '{}' marked as completed.", self.id, self.description);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "✓" } else { " " };
        write!(
            f,
            "[{}] {}. ({}) {}",
            status, self.id, self.priority, self.description
        )?;
        match self.due_date.as_deref() {
            Some(due) if !due.is_empty() => write!(f, " (Due: {})", due),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("priority must be one of low, medium, high; got: {0}")]
    InvalidPriority(String),
}
