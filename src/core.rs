//! Core runtime logic for gotry.
//!
//! This module contains the non-UI “engine” pieces used by the application:
//! - [catalog]: listing the workspace and parsing `YYYY-MM-DD-label` names (see [list_entries], [WorkspaceEntry]).
//! - [filter]: fuzzy filtering of the catalog against the search query.
//! - [mutate]: creating collision-free dated directories and deleting batches of them.
//! - [formatter]: relative ages and width helpers for the entry list.
//! - [git]: the git subprocess calls used by the create and clone flows.
//! - [worker]: the background catalog loader and its message types.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the error type surfaced to the shell.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod git;
pub mod mutate;
pub mod terminal;
pub mod worker;

pub use catalog::{WorkspaceEntry, list_entries, split_name};
pub use error::{Error, Result};
pub use filter::{Filter, filter_entries};
pub use formatter::{format_age, format_elapsed, gap_to_column, truncate_to_width};
pub use mutate::{create_entry, create_entry_on, delete_entries, sanitize_name, unused_path};
