//! Command-line interface for tsk
//!
//! This module defines the CLI structure using clap derive macros. The
//! subcommand run functions live in `tasks`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod tasks;

/// tsk - a local task list
///
/// Create, edit, complete, delete, filter, search, and sort a personal
/// collection of tasks, persisted in a single JSON file.
#[derive(Parser, Debug)]
#[command(name = "tsk")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the task file (defaults to the platform data dir)
    #[arg(long, global = true, env = "TSK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "TSK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date (YYYY-MM-DD, today or later)
        #[arg(long)]
        due: String,
    },

    /// Edit an existing task in place (unset flags keep current values)
    Edit {
        /// Task id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD, today or later)
        #[arg(long)]
        due: Option<String>,
    },

    /// Toggle a task between completed and incomplete
    Done {
        /// Task id
        id: u64,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List tasks, optionally filtered, searched, and sorted
    List {
        /// Completion filter: all, completed, incomplete
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive substring match on title or description
        #[arg(long)]
        search: Option<String>,

        /// Sort column: title, description, due-date, completed
        #[arg(long)]
        sort: Option<String>,

        /// Sort order: asc, desc
        #[arg(long, default_value = "asc")]
        order: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add {
                title,
                description,
                due,
            } => tasks::run_add(tasks::AddOptions {
                title,
                description,
                due,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                title,
                description,
                due,
            } => tasks::run_edit(tasks::EditOptions {
                id,
                title,
                description,
                due,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => tasks::run_done(tasks::DoneOptions {
                id,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id, yes } => tasks::run_rm(tasks::RmOptions {
                id,
                yes,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                status,
                search,
                sort,
                order,
            } => tasks::run_list(tasks::ListOptions {
                status,
                search,
                sort,
                order,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
