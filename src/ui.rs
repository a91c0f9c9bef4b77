//! Terminal UI for gotry.
//!
//! [render] draws a frame, [build_lines] produces the same content without a terminal.

pub mod render;

pub use render::{build_lines, render};
