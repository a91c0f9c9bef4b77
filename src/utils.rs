//! Miscellaneous utilities for gotry.
//!
//! - [cli]: argument parsing, help and version output
//! - [helpers]: colour parsing and `~` handling
//! - [shell]: the `gt` shell integration scripts
//! - [logging]: opt-in tracing to a log file

pub mod cli;
pub mod helpers;
pub mod logging;
pub mod shell;

pub use helpers::{expand_home_path, get_home, parse_color, shorten_home_path};
pub use logging::init_logging;
pub use shell::Shell;
