//! The flows behind the `gotry` command line.
//!
//! Each flow returns the directory to hand back to the shell. Printing is left to `main`.

use crate::app::{Outcome, Session};
use crate::config::Config;
use crate::core::git::{self, RepoTarget};
use crate::core::terminal::run_terminal;
use crate::core::worker::Workers;
use crate::core::{Error, Result, create_entry, unused_path};

use chrono::{Local, NaiveDate};
use tracing::info;

use std::fs;
use std::path::{Path, PathBuf};

/// Which git steps follow a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitPolicy {
    pub init: bool,
    pub commit: bool,
}

impl GitPolicy {
    /// Config flags narrowed by `--no-git` / `--no-commit`.
    pub fn resolve(config: &Config, no_git: bool, no_commit: bool) -> Self {
        let init = config.git().auto_init() && !no_git;
        Self {
            init,
            commit: init && config.git().initial_commit() && !no_commit,
        }
    }
}

/// Makes sure the workspace exists before anything lists or creates in it.
pub fn ensure_workspace(base: &Path) -> Result<()> {
    fs::create_dir_all(base).map_err(|e| Error::io(base, e))
}

/// Runs the interactive picker and returns how the session ended.
pub fn pick(base: &Path, query: &str, config: &Config) -> Result<Option<Outcome>> {
    let mut session = Session::new(base, query);
    let mut workers = Workers::spawn();
    run_terminal(&mut session, &mut workers, config)?;
    Ok(session.into_outcome())
}

/// Creates a new dated directory for `name` and applies the git policy to it.
pub fn create_workspace(base: &Path, name: &str, policy: GitPolicy) -> Result<PathBuf> {
    let path = create_entry(base, name).map_err(|e| Error::io(base, e))?;
    info!(path = %path.display(), "created workspace");

    if policy.init {
        git::init(&path)?;
        if policy.commit {
            git::initial_commit(&path)?;
        }
    }
    Ok(path)
}

/// First free `YYYY-MM-DD-owner-repo[-N]` under `base` for `target`.
pub fn clone_destination(base: &Path, target: &RepoTarget, date: NaiveDate) -> PathBuf {
    unused_path(&base.join(target.dir_name(date)))
}

/// Clones `url` into a new dated directory.
pub fn clone_workspace(base: &Path, url: &str) -> Result<PathBuf> {
    let target = RepoTarget::parse(url)?;
    let dest = clone_destination(base, &target, Local::now().date_naive());
    info!(url, dest = %dest.display(), "cloning");
    git::clone(url, &dest)?;
    Ok(dest)
}

/// Turns a finished picker session into the path to print, creating a directory if asked.
pub fn resolve_outcome(
    outcome: Option<Outcome>,
    base: &Path,
    policy: GitPolicy,
) -> Result<Option<PathBuf>> {
    match outcome {
        None => Ok(None),
        Some(Outcome::Selected(path)) => Ok(Some(path)),
        Some(Outcome::Create(name)) => create_workspace(base, &name, policy).map(Some),
    }
}
