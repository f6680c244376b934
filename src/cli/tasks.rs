//! tsk subcommand implementations.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Field, Result, ValidationFailure};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::view::{self, SortColumn, SortOrder, StatusFilter};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub due: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DoneOptions {
    pub id: u64,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: u64,
    pub yes: bool,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub status: String,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut store = open_store(options.data_dir, options.config)?;
    let due_date = parse_due(&options.due)?;

    let task = store.create(TaskDraft::new(
        options.title.trim(),
        options.description.trim(),
        due_date,
    ))?;

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Due", task.due_date.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &task,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut store = open_store(options.data_dir, options.config)?;

    let patch = TaskPatch {
        title: options.title.map(|title| title.trim().to_string()),
        description: options
            .description
            .map(|description| description.trim().to_string()),
        due_date: options.due.as_deref().map(parse_due).transpose()?,
    };
    let task = store.update(options.id, patch)?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Due", task.due_date.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &task,
        Some(&human),
    )
}

pub fn run_done(options: DoneOptions) -> Result<()> {
    let mut store = open_store(options.data_dir, options.config)?;
    let task = store.toggle_completion(options.id)?;

    let state = if task.completed {
        "completed"
    } else {
        "incomplete"
    };
    let mut human = HumanOutput::new(format!("Task marked {state}"));
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Title", task.title.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &task,
        Some(&human),
    )
}

#[derive(Debug, Serialize)]
struct RemovalOutput {
    id: u64,
    removed: bool,
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut store = open_store(options.data_dir, options.config)?;

    if let Some(task) = store.get(options.id) {
        if !options.yes && !confirm_removal(task)? {
            let human = HumanOutput::new("Delete cancelled");
            return emit_success(
                OutputOptions {
                    json: options.json,
                    quiet: options.quiet,
                },
                "rm",
                &RemovalOutput {
                    id: options.id,
                    removed: false,
                },
                Some(&human),
            );
        }
    }

    let removed = store.delete(options.id)?;

    let header = if removed {
        "Task deleted"
    } else {
        "No task with that id; nothing deleted"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("ID", options.id.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &RemovalOutput {
            id: options.id,
            removed,
        },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let store = open_store(options.data_dir, options.config)?;

    let status: StatusFilter = options.status.parse()?;
    let order: SortOrder = options.order.parse()?;
    let sort: Option<SortColumn> = options.sort.as_deref().map(str::parse).transpose()?;

    // Projection chain over a snapshot: status filter, then search, then
    // sort. The store itself is never touched.
    let mut tasks = view::filter_by_status(&store.snapshot(), status);
    if let Some(query) = options.search.as_deref() {
        tasks = view::search(&tasks, query);
    }
    if let Some(column) = sort {
        tasks = view::sort_by(&tasks, column, order);
    }

    let mut human = HumanOutput::new(format!(
        "{} task{}",
        tasks.len(),
        if tasks.len() == 1 { "" } else { "s" }
    ));
    for task in &tasks {
        human.push_detail(render_line(task));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &tasks,
        Some(&human),
    )
}

fn render_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {}  {}", task.id, task.title);
    if !task.description.is_empty() {
        line.push_str(&format!(" - {}", task.description));
    }
    line.push_str(&format!(" (due {})", task.due_date));
    line
}

/// Resolve config and the blob location, then load the store.
///
/// Precedence for the blob: `--data-dir`/`TSK_DATA_DIR`, then the config
/// `[storage] file`, then the platform data directory.
fn open_store(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<TaskStore> {
    let config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::load_default(),
    };

    let storage = if let Some(dir) = data_dir {
        Storage::in_dir(&dir)
    } else if let Some(file) = config.storage.file.clone() {
        Storage::new(file)
    } else {
        let dir = Storage::default_dir().ok_or_else(|| {
            Error::InvalidArgument(
                "cannot determine a data directory; pass --data-dir or set TSK_DATA_DIR"
                    .to_string(),
            )
        })?;
        Storage::in_dir(&dir)
    };

    Ok(TaskStore::open(storage, config.tasks))
}

/// Parse a `YYYY-MM-DD` argument.
///
/// An empty value is a validation failure on the due-date field; anything
/// unparseable is a bad argument.
fn parse_due(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        let mut failure = ValidationFailure::default();
        failure.push(Field::DueDate, "is required");
        return Err(Error::Validation(failure));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{value}', expected YYYY-MM-DD"))
    })
}

fn confirm_removal(task: &Task) -> Result<bool> {
    eprint!("Delete task {} \"{}\"? [y/N] ", task.id, task.title);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
