//! Creating and deleting workspace directories.
//!
//! New directories are named `YYYY-MM-DD-<sanitized name>`. Collisions never overwrite:
//! the candidate gets `-2`, `-3`, ... appended until a free name is found.

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lowercases the name and turns spaces into hyphens. Nothing else is escaped.
pub fn sanitize_name(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "-")
}

/// Directory name for `raw` created on `date`.
pub fn dated_name(date: NaiveDate, raw: &str) -> String {
    format!("{}-{}", date.format("%Y-%m-%d"), sanitize_name(raw))
}

/// First free path among `candidate`, `candidate-2`, `candidate-3`, ...
///
/// Suffixes are always appended to the original candidate, never stacked.
pub fn unused_path(candidate: &Path) -> PathBuf {
    if !exists(candidate) {
        return candidate.to_path_buf();
    }

    let base = candidate.as_os_str().to_owned();
    let mut counter = 2u32;
    loop {
        let mut next = base.clone();
        next.push(format!("-{counter}"));
        let next = PathBuf::from(next);
        if !exists(&next) {
            return next;
        }
        counter += 1;
    }
}

/// Creates `<base>/<today>-<sanitized raw>` (with missing parents) and returns its path.
pub fn create_entry(base: &Path, raw: &str) -> io::Result<PathBuf> {
    create_entry_on(base, raw, Local::now().date_naive())
}

/// Like [create_entry] with an explicit date.
pub fn create_entry_on(base: &Path, raw: &str, date: NaiveDate) -> io::Result<PathBuf> {
    let target = unused_path(&base.join(dated_name(date, raw)));
    fs::create_dir_all(&target)?;
    debug!(path = %target.display(), "created workspace directory");
    Ok(target)
}

/// Removes each path recursively, in order.
///
/// Stops at the first failure and returns it. Paths after the failing one are left
/// untouched, so a batch can be partially applied. Returns the number of removed paths.
pub fn delete_entries(paths: &[PathBuf], move_to_trash: bool) -> io::Result<usize> {
    for (done, path) in paths.iter().enumerate() {
        let res = if move_to_trash {
            trash::delete(path).map_err(|e| io::Error::other(e.to_string()))
        } else {
            fs::remove_dir_all(path)
        };
        if let Err(e) = res {
            warn!(path = %path.display(), removed = done, error = %e, "delete failed");
            return Err(e);
        }
        debug!(path = %path.display(), trash = move_to_trash, "deleted");
    }
    Ok(paths.len())
}

/// Existence check that also sees dangling symlinks, so they are never clobbered.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
