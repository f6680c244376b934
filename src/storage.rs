//! Storage layer for tsk
//!
//! The whole task collection lives in a single JSON blob:
//!
//! ```text
//! <data dir>/
//!   tasks.json    # JSON array of every task, rewritten on each mutation
//! ```
//!
//! The data dir defaults to the platform data directory for "tsk" and can
//! be overridden by the `TSK_DATA_DIR` environment variable, the
//! `--data-dir` flag, or the `[storage] file` config key.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;
use crate::task::Task;

/// Name of the blob file inside the data directory
pub const TASKS_FILE: &str = "tasks.json";

/// Storage manager for the task blob
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the JSON blob holding the whole collection
    blob_path: PathBuf,
}

impl Storage {
    /// Create a storage manager for an explicit blob path
    pub fn new(blob_path: PathBuf) -> Self {
        Self { blob_path }
    }

    /// Create storage for the conventional blob inside a data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TASKS_FILE))
    }

    /// Platform default data directory, when one can be determined
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tsk").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Path to the blob file
    pub fn blob_path(&self) -> &Path {
        &self.blob_path
    }

    /// Read the whole collection.
    ///
    /// A missing blob or one that fails to parse yields an empty
    /// collection; this never raises. Parse failures are logged so a user
    /// who hand-edited the file has a trail.
    pub fn load(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.blob_path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(
                    path = %self.blob_path.display(),
                    error = %err,
                    "task blob failed to parse, starting from an empty collection"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the blob with the full collection.
    ///
    /// The write is atomic (temp file + rename), so a failure mid-write
    /// leaves the previous blob intact.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(json.as_bytes())
    }

    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.blob_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.blob_path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.blob_path)?;

        Ok(())
    }
}
