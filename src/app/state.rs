//! Session state and event types for the gotry picker.
//!
//! A [Session] is the single mutable structure behind the interactive loop. It is driven
//! exclusively through [Session::handle], one [Event] at a time, and answers each event
//! with at most one [Command] for the runtime to execute. It never touches the terminal,
//! the filesystem or the worker thread itself, which keeps every transition testable
//! without a TTY.
//!
//! Mode transitions:
//! - `Normal` -> `Delete` on the delete key (only with a non-empty list)
//! - `Delete` -> `Confirm` on enter (only with at least one mark)
//! - `Confirm` -> `Normal` on enter with `YES` typed (emits [Command::Delete])
//! - escape steps back: `Confirm` -> `Delete` -> `Normal` -> session ends

use crate::app::input::SearchInput;
use crate::app::keymap::Action;
use crate::core::{Filter, WorkspaceEntry};

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Token that must be typed in the confirm prompt before anything is deleted.
pub const CONFIRM_TOKEN: &str = "YES";

/// Prefix marking a result line as a create-request rather than an existing path.
pub const CREATE_PREFIX: &str = "CREATE:";

/// Interaction mode of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing, searching and creating.
    #[default]
    Normal,
    /// Multi-select marking for deletion.
    Delete,
    /// Typed confirmation gate before marked entries are removed.
    Confirm,
}

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An existing directory was picked.
    Selected(PathBuf),
    /// Nothing matched; create a new directory from this raw query text.
    Create(String),
}

impl Outcome {
    /// Parses the textual form produced by [Outcome]'s `Display` impl.
    /// An empty line means the session was cancelled.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return None;
        }
        Some(match line.strip_prefix(CREATE_PREFIX) {
            Some(name) => Outcome::Create(name.to_string()),
            None => Outcome::Selected(PathBuf::from(line)),
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Selected(path) => write!(f, "{}", path.display()),
            Outcome::Create(name) => write!(f, "{CREATE_PREFIX}{name}"),
        }
    }
}

/// A key press after keymap translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    Char(char),
    Backspace,
    Left,
    Right,
    Home,
    End,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search text was replaced wholesale.
    TextChanged(String),
    /// A translated key press.
    Key(Input),
    /// A background catalog load finished.
    CatalogLoaded(Vec<WorkspaceEntry>),
    /// A background catalog load failed. Fatal for the session.
    LoadFailed(String),
    /// The runtime executed a [Command::Delete]; number of removed paths or the error text.
    DeleteFinished(Result<usize, String>),
}

/// Follow-up work a transition asks the runtime to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    /// Start a background catalog load.
    Reload,
    /// Remove these directories, then report back with [Event::DeleteFinished].
    Delete(Vec<PathBuf>),
    /// The session is over; [Session::outcome] holds the result.
    Quit,
}

/// The mutable state of one interactive session.
pub struct Session {
    pub(super) base: PathBuf,
    pub(super) filter: Filter,

    pub(super) all: Vec<WorkspaceEntry>,
    pub(super) visible: Vec<WorkspaceEntry>,
    pub(super) cursor: usize,
    pub(super) loaded: bool,

    pub(super) mode: Mode,
    pub(super) marked: BTreeSet<usize>,
    pub(super) confirm_text: String,
    pub(super) search: SearchInput,
    pub(super) notice: Option<String>,

    pub(super) result: Option<Outcome>,
    pub(super) done: bool,
}

impl Session {
    /// Creates a session in Normal mode with `initial_query` in the search box.
    ///
    /// The catalog is empty until the first [Event::CatalogLoaded]; the runtime should
    /// execute [Session::init] right away.
    pub fn new(base: impl Into<PathBuf>, initial_query: &str) -> Self {
        Self {
            base: base.into(),
            filter: Filter::default(),
            all: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            loaded: false,
            mode: Mode::Normal,
            marked: BTreeSet::new(),
            confirm_text: String::new(),
            search: SearchInput::new(initial_query),
            notice: None,
            result: None,
            done: false,
        }
    }

    /// The command that starts a session: the initial catalog load.
    pub fn init(&self) -> Command {
        Command::Reload
    }

    // Getters / accessors

    #[inline]
    pub fn base(&self) -> &Path {
        &self.base
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn all_entries(&self) -> &[WorkspaceEntry] {
        &self.all
    }

    #[inline]
    pub fn visible(&self) -> &[WorkspaceEntry] {
        &self.visible
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&WorkspaceEntry> {
        self.visible.get(self.cursor)
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[inline]
    pub fn query(&self) -> &str {
        self.search.value()
    }

    #[inline]
    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    #[inline]
    pub fn marked(&self) -> &BTreeSet<usize> {
        &self.marked
    }

    #[inline]
    pub fn is_marked(&self, idx: usize) -> bool {
        self.marked.contains(&idx)
    }

    #[inline]
    pub fn confirm_text(&self) -> &str {
        &self.confirm_text
    }

    #[inline]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.result.as_ref()
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        self.result
    }

    /// Paths of the currently marked entries, in list order.
    pub fn marked_paths(&self) -> Vec<PathBuf> {
        self.marked
            .iter()
            .filter_map(|&idx| self.visible.get(idx))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// Feeds one event into the state machine.
    ///
    /// Once the session is done every further event is ignored, so a catalog load that
    /// completes after cancellation is simply dropped.
    pub fn handle(&mut self, event: Event) -> Command {
        if self.done {
            return Command::None;
        }

        match event {
            Event::CatalogLoaded(entries) => self.on_catalog_loaded(entries),
            Event::LoadFailed(_) => self.finish(None),
            Event::DeleteFinished(res) => self.on_delete_finished(res),
            Event::TextChanged(text) => self.on_text_changed(&text),
            Event::Key(input) => {
                self.notice = None;
                match self.mode {
                    Mode::Normal => self.handle_normal(input),
                    Mode::Delete => self.handle_delete(input),
                    Mode::Confirm => self.handle_confirm(input),
                }
            }
        }
    }

    /// Recomputes the visible list from the query and clamps the cursor into range.
    pub(super) fn refilter(&mut self) {
        self.visible = self.filter.apply(self.search.value(), &self.all);
        self.clamp_cursor();
    }

    pub(super) fn clamp_cursor(&mut self) {
        self.cursor = match self.visible.len() {
            0 => 0,
            len => self.cursor.min(len - 1),
        };
    }

    pub(super) fn finish(&mut self, result: Option<Outcome>) -> Command {
        self.result = result;
        self.done = true;
        Command::Quit
    }
}
