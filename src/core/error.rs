//! Error types for gotry.
//!
//! Catalog and mutator functions return plain [std::io::Result]s. The command layer
//! (create, clone, config, git) wraps those into [Error] with the offending path attached
//! so the message printed to the shell says which directory failed.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors surfaced to the invoking shell.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure on a specific path.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The argument looked like a repository URL but could not be split into owner/repo.
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),

    /// `git` is not installed or not on PATH.
    #[error("git was not found in PATH")]
    GitMissing,

    /// A git subprocess ran but exited unsuccessfully.
    #[error("git {action} failed ({status})")]
    Git { action: &'static str, status: ExitStatus },

    /// Config file exists but could not be read or written.
    #[error("config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Terminal setup, drawing or teardown failed.
    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
