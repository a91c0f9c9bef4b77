//! Application state and input handling for gotry.
//!
//! - [state]: the [Session] state machine and its event, command and outcome types.
//! - [handlers]: one handler per mode, driven by [Session::handle].
//! - [keymap]: config driven key bindings and key event translation.
//! - [input]: the search box text buffer.

pub mod handlers;
pub mod input;
pub mod keymap;
pub mod state;

pub use input::SearchInput;
pub use keymap::{Action, Key, Keymap, parse_key};
pub use state::{CONFIRM_TOKEN, CREATE_PREFIX, Command, Event, Input, Mode, Outcome, Session};
