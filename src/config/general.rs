//! The `[workspace]`, `[git]` and `[general]` sections of the gotry config.

use crate::utils::expand_home_path;

use serde::Deserialize;

use std::path::{Path, PathBuf};

/// Default workspace location, `~` is expanded on load.
pub const DEFAULT_WORKSPACE: &str = "~/tries";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct RawWorkspace {
    path: String,
}

impl Default for RawWorkspace {
    fn default() -> Self {
        RawWorkspace {
            path: DEFAULT_WORKSPACE.to_string(),
        }
    }
}

/// Where the experiment directories live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    path: PathBuf,
}

impl From<RawWorkspace> for Workspace {
    fn from(raw: RawWorkspace) -> Self {
        Self {
            path: expand_home_path(&raw.path),
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        RawWorkspace::default().into()
    }
}

impl Workspace {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Version control policy for newly created directories.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Git {
    auto_init: bool,
    initial_commit: bool,
}

impl Default for Git {
    fn default() -> Self {
        Git {
            auto_init: true,
            initial_commit: true,
        }
    }
}

impl Git {
    #[inline]
    pub fn auto_init(&self) -> bool {
        self.auto_init
    }

    /// Only meaningful when [Git::auto_init] is set.
    #[inline]
    pub fn initial_commit(&self) -> bool {
        self.initial_commit
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct General {
    move_to_trash: bool,
}

impl General {
    #[inline]
    pub fn move_to_trash(&self) -> bool {
        self.move_to_trash
    }
}
