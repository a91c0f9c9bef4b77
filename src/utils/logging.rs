//! Optional file logging.
//!
//! The TUI owns the terminal, so tracing output never goes to stdout or stderr. Logging stays
//! off unless `GOTRY_LOG` holds a filter directive (`debug`, `gotry_tui=trace`, ...).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

/// Filter directive, e.g. `GOTRY_LOG=debug`.
pub const LOG_ENV: &str = "GOTRY_LOG";
/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "GOTRY_LOG_FILE";

/// `$GOTRY_LOG_FILE`, else `<cache dir>/gotry/gotry.log`.
pub fn log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::cache_dir().map(|dir| dir.join("gotry").join("gotry.log"))
}

/// Installs the global subscriber when `GOTRY_LOG` is set. Failures only print a warning.
pub fn init_logging() {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return;
    };
    let Some(path) = log_path() else {
        eprintln!("gotry: no cache directory for the log file, set {LOG_FILE_ENV}");
        return;
    };

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("gotry: cannot create {}: {e}", parent.display());
        return;
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("gotry: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gotry starting");
}
