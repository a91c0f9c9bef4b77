//! Configuration module for gotry
//!
//! Loads `config.toml` into a [Config] that the rest of the program only ever reads.
//!
//! Submodules:
//! - [load]: lookup, parsing and the default file
//! - [general]: workspace location, git policy and general behaviour
//! - [input]: key bindings
//! - [theme]: colours and icons handed to the renderer

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::{General, Git, Workspace};
pub use input::Keys;
pub use load::Config;
pub use theme::{ColorPair, Theme};
