//! tsk - Local task-list library
//!
//! This library backs the `tsk` CLI: a personal task list persisted as a
//! single JSON blob on disk.
//!
//! # Core Concepts
//!
//! - **Task Store**: the sole owner of the in-memory collection; every
//!   mutation is validated and then written through to storage before the
//!   call returns.
//! - **Persistence Adapter**: reads and rewrites the whole collection as
//!   one blob; a missing or corrupt blob loads as an empty collection.
//! - **View Projections**: pure filter/search/sort functions over a
//!   snapshot, composable in any order and never mutating the store.
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `config.toml`
//! - `error`: error types and result aliases
//! - `output`: human and JSON output envelopes
//! - `storage`: the single-blob persistence adapter
//! - `store`: the task store owning the session's collection
//! - `task`: the task record, drafts, patches, and field validation
//! - `view`: filter, search, and sort projections

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use error::{Error, Result};
pub use store::TaskStore;
pub use task::Task;
