//! The task store: the single owner of the in-memory collection.
//!
//! Every mutator validates, applies the change, then writes the whole
//! collection through to storage before returning, so the blob and the
//! in-memory list agree after each successful call. If the write itself
//! fails the mutation is kept in memory (the session's source of truth)
//! and the error is returned for the caller to surface.

use chrono::Utc;

use crate::config::TasksConfig;
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{today, Task, TaskDraft, TaskPatch};

/// Owns the authoritative task list for one session.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    config: TasksConfig,
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskStore {
    /// Load the persisted collection and take ownership of it.
    pub fn open(storage: Storage, config: TasksConfig) -> Self {
        let tasks = storage.load();
        let last_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        Self {
            storage,
            config,
            tasks,
            last_id,
        }
    }

    pub fn config(&self) -> &TasksConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned snapshot for the projection layer.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Validate, append, persist.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        draft
            .validate(today(), self.config.require_description)
            .map_err(Error::Validation)?;

        let task = Task {
            id: self.next_id(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            completed: false,
        };
        tracing::debug!(id = task.id, title = %task.title, "task created");

        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Replace the editable fields in place, preserving `id` and
    /// `completed`. The merged result is re-validated as a whole.
    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Result<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(Error::NotFound(id))?;

        let draft = patch.merge_into(&self.tasks[position]);
        draft
            .validate(today(), self.config.require_description)
            .map_err(Error::Validation)?;

        let task = &mut self.tasks[position];
        task.title = draft.title;
        task.description = draft.description;
        task.due_date = draft.due_date;
        let updated = task.clone();

        self.persist()?;
        Ok(updated)
    }

    /// Remove the task if present; reports whether a removal occurred.
    ///
    /// Deleting an unknown id is not an error and does not touch storage.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Flip `completed` on the matching task. The only mutation allowed
    /// outside the edit path.
    pub fn toggle_completion(&mut self, id: u64) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))?;

        task.completed = !task.completed;
        let toggled = task.clone();

        self.persist()?;
        Ok(toggled)
    }

    /// Millisecond timestamp, bumped past the last issued id so rapid
    /// calls within the same millisecond stay unique and monotonic.
    fn next_id(&mut self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.tasks)
    }
}
