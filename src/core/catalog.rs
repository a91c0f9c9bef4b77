//! Workspace directory listing for gotry.
//!
//! Provides the [WorkspaceEntry] struct which is used throughout gotry and the
//! [list_entries] function which builds the catalog shown in the TUI.
//!
//! Directory names follow the `YYYY-MM-DD-label` convention. Parsing is purely lexical:
//! a name with hyphens at byte offsets 4, 7 and 10 is split into a date prefix and a label,
//! without checking that the date is a real calendar date.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Length of the `YYYY-MM-DD` prefix.
const DATE_PREFIX_LEN: usize = 10;

/// One child directory of the workspace base path.
///
/// Built fresh on every catalog load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    name: String,
    path: PathBuf,
    modified: SystemTime,
    date_prefix: Option<String>,
    label: String,
}

impl WorkspaceEntry {
    pub fn new(name: impl Into<String>, path: PathBuf, modified: SystemTime) -> Self {
        let name = name.into();
        let (date_prefix, label) = match split_name(&name) {
            Some((date, label)) => (Some(date.to_string()), label.to_string()),
            None => (None, name.clone()),
        };
        Self {
            name,
            path,
            modified,
            date_prefix,
            label,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn date_prefix(&self) -> Option<&str> {
        self.date_prefix.as_deref()
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Splits `YYYY-MM-DD-label` into its date prefix and label.
///
/// Returns None when the name is shorter than 11 bytes or lacks a hyphen at 4, 7 or 10.
/// The label may be empty (`"2024-01-01-"`).
pub fn split_name(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    if bytes.len() <= DATE_PREFIX_LEN
        || bytes[4] != b'-'
        || bytes[7] != b'-'
        || bytes[DATE_PREFIX_LEN] != b'-'
    {
        return None;
    }
    // byte 10 is an ASCII hyphen, so both offsets are char boundaries
    Some((&name[..DATE_PREFIX_LEN], &name[DATE_PREFIX_LEN + 1..]))
}

/// Reads the immediate child directories of `base` and returns them most recent first.
///
/// A missing base directory yields an empty catalog. Children that are not directories,
/// or whose metadata cannot be read, are skipped. Any other failure to read `base` is
/// returned as an error.
///
/// Entries with equal modification times keep the order the OS listed them in.
pub fn list_entries(base: &Path) -> io::Result<Vec<WorkspaceEntry>> {
    let read_dir = match fs::read_dir(base) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries = Vec::with_capacity(64);
    for entry in read_dir {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();

        // follows symlinks so linked workspaces are listed too
        let Ok(md) = fs::metadata(&path) else {
            continue;
        };
        if !md.is_dir() {
            continue;
        }
        let Ok(modified) = md.modified() else {
            continue;
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(WorkspaceEntry::new(name, path, modified));
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(entries)
}
