//! View projections: pure, stateless functions from a task snapshot to an
//! ordered sequence for display.
//!
//! Filtering, searching, and sorting compose in any order; none of them
//! mutates its input and none remembers what was applied before. The caller
//! chains them explicitly.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::task::Task;

/// Completion-status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "incomplete" | "open" => Ok(StatusFilter::Incomplete),
            other => Err(Error::InvalidArgument(format!(
                "unknown status filter '{other}' (expected all, completed, or incomplete)"
            ))),
        }
    }
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Description,
    DueDate,
    Completed,
}

impl FromStr for SortColumn {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "title" => Ok(SortColumn::Title),
            "description" => Ok(SortColumn::Description),
            "due-date" | "due_date" | "duedate" | "due" => Ok(SortColumn::DueDate),
            "completed" => Ok(SortColumn::Completed),
            other => Err(Error::InvalidArgument(format!(
                "unknown sort column '{other}' (expected title, description, due-date, or completed)"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::InvalidArgument(format!(
                "unknown sort order '{other}' (expected asc or desc)"
            ))),
        }
    }
}

/// Keep only tasks whose completion matches `status`.
pub fn filter_by_status(tasks: &[Task], status: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| match status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Incomplete => !task.completed,
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match over title OR description. An empty
/// query matches everything.
pub fn search(tasks: &[Task], query: &str) -> Vec<Task> {
    if query.is_empty() {
        return tasks.to_vec();
    }

    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stable sort by one column; ties keep their original relative order.
pub fn sort_by(tasks: &[Task], column: SortColumn, order: SortOrder) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|left, right| {
        let ordering = compare(left, right, column);
        match order {
            SortOrder::Asc => ordering,
            // Reversing the comparator keeps Equal as Equal, so the sort
            // stays stable in both directions.
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(left: &Task, right: &Task, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Title => left.title.cmp(&right.title),
        SortColumn::Description => left.description.cmp(&right.description),
        SortColumn::DueDate => left.due_date.cmp(&right.due_date),
        SortColumn::Completed => left.completed.cmp(&right.completed),
    }
}
