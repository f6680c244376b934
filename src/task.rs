//! Task data model and field validation.
//!
//! Tasks are persisted as a single JSON array; the on-disk field names are
//! camelCase (`dueDate`) for compatibility with blobs written by earlier
//! versions of the tool, which also sometimes shortened `description` to
//! `desc`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationFailure};

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, timestamp-derived, never reassigned.
    pub id: u64,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

/// The caller-supplied fields for a create or a fully merged update.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date,
        }
    }

    /// Check every field and report all failures at once.
    ///
    /// `today` is evaluated once per operation by the caller and compared at
    /// day granularity.
    pub fn validate(
        &self,
        today: NaiveDate,
        require_description: bool,
    ) -> std::result::Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::default();

        if self.title.is_empty() {
            failure.push(Field::Title, "is required");
        }
        if require_description && self.description.is_empty() {
            failure.push(Field::Description, "is required");
        }
        if self.due_date < today {
            failure.push(
                Field::DueDate,
                format!("must not be before today ({today})"),
            );
        }

        if failure.is_empty() {
            Ok(())
        } else {
            Err(failure)
        }
    }
}

/// A partial edit; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// Merge this patch over an existing task into a full draft for
    /// re-validation.
    pub fn merge_into(&self, task: &Task) -> TaskDraft {
        TaskDraft {
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            due_date: self.due_date.unwrap_or(task.due_date),
        }
    }
}

/// The current local calendar date, ignoring time of day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
