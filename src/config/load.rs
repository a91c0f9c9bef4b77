//! The main config loading module for gotry.
//!
//! Handles locating and deserializing `config.toml` into the internal [RawConfig], converting
//! it into the [Config] used by the rest of the program, and writing the default file.

use crate::config::general::RawWorkspace;
use crate::config::{General, Git, Keys, Theme, Workspace};
use crate::core::{Error, Result};
use crate::utils::{get_home, shorten_home_path};

use serde::Deserialize;
use tracing::{debug, warn};

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Contents written by `gotry config --init`.
pub const DEFAULT_CONFIG: &str = r##"# gotry configuration

[workspace]
path = "~/tries"

[git]
auto_init = true
initial_commit = true

# [general]
# move_to_trash = false

# Colours are names ("cyan"), hex ("#RRGGBB"), 256-colour indices ("212") or "default".
# [theme]
# cursor_icon = "→"
# dir_icon = "📁"
# marked_icon = "🗑️"
# title.fg = "212"
# prompt.fg = "241"
# input.fg = "255"
# selection.fg = "212"
# entry.fg = "255"
# dim.fg = "241"
# danger.fg = "196"
# hint_key.fg = "212"
# hint_desc.fg = "241"

# [keys]
# select = ["enter"]
# up = ["up", "ctrl+p"]
# down = ["down", "ctrl+n"]
# cancel = ["esc", "ctrl+c"]
# delete = ["ctrl+d"]
# toggle_mark = ["space", "ctrl+d"]
"##;

/// Raw configuration as read from the toml file.
/// It is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    workspace: RawWorkspace,
    git: Git,
    general: General,
    theme: Theme,
    keys: Keys,
}

/// Resolved configuration of gotry.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    workspace: Workspace,
    git: Git,
    general: General,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            workspace: raw.workspace.into(),
            git: raw.git,
            general: raw.general,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file silently yields the defaults; a file that fails to read or parse is
    /// reported on stderr and the defaults are used instead.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "falling back to default config");
                eprintln!("gotry: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Strictly load one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Into::into)
    }

    /// Determine the default configuration file path.
    /// Checks the GOTRY_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/gotry/config.toml
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("GOTRY_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("gotry/config.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/gotry/config.toml");
        }
        PathBuf::from("config.toml")
    }

    /// Writes [DEFAULT_CONFIG] to `path`, creating parent directories.
    /// Refuses to overwrite an existing file.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)
    }

    /// Human readable dump used by `gotry config`.
    pub fn describe(&self, path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Configuration");
        let _ = writeln!(out, "─────────────");
        let _ = writeln!(out, "Config file:    {}", shorten_home_path(path));
        let _ = writeln!(out, "Workspace:      {}", self.workspace.path().display());
        let _ = writeln!(out, "Auto git init:  {}", self.git.auto_init());
        let _ = writeln!(out, "Initial commit: {}", self.git.initial_commit());
        let _ = writeln!(out, "Move to trash:  {}", self.general.move_to_trash());

        if !path.exists() {
            let _ = writeln!(out, "\n(Using defaults - no config file found)");
            let _ = writeln!(out, "\nCreate config file with:");
            let _ = writeln!(out, "  gotry config --init");
            let _ = writeln!(out, "or:");
            if let Some(parent) = path.parent() {
                let _ = writeln!(out, "  mkdir -p {}", parent.display());
            }
            let _ = writeln!(out, "  cat > {} << 'EOF'", path.display());
            let _ = writeln!(out, "[workspace]\npath = \"~/tries\"\n");
            let _ = writeln!(out, "[git]\nauto_init = true\ninitial_commit = true\nEOF");
        }
        out
    }

    // Getters

    #[inline]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    #[inline]
    pub fn git(&self) -> &Git {
        &self.git
    }

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}
