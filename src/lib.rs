//! Internal library crate for gotry.
//!
//! The shipped application is the `gotry` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `gotry` binary and is not considered a library for external use.

pub mod app;
pub mod commands;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
