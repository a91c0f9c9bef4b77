//! Per-mode event handlers for [Session].
//!
//! [Session::handle] routes each event here. Every handler mutates the session in place and
//! returns the single [Command] the runtime should execute next.

use crate::app::keymap::Action;
use crate::app::state::{CONFIRM_TOKEN, Command, Input, Mode, Outcome, Session};
use crate::core::WorkspaceEntry;

use tracing::debug;

impl Session {
    pub(super) fn handle_normal(&mut self, input: Input) -> Command {
        match input {
            Input::Action(Action::Select) => {
                if let Some(entry) = self.selected() {
                    let path = entry.path().to_path_buf();
                    return self.finish(Some(Outcome::Selected(path)));
                }
                if !self.search.is_empty() {
                    let name = self.search.value().to_string();
                    return self.finish(Some(Outcome::Create(name)));
                }
                Command::None
            }
            Input::Action(Action::Up) => self.move_up(),
            Input::Action(Action::Down) => self.move_down(),
            Input::Action(Action::Cancel) => self.finish(None),
            Input::Action(Action::Delete) => {
                if !self.visible.is_empty() {
                    self.mode = Mode::Delete;
                    self.marked.clear();
                }
                Command::None
            }
            Input::Action(Action::ToggleMark) => Command::None,

            Input::Char(ch) => {
                self.search.insert(ch);
                self.refilter();
                Command::None
            }
            Input::Backspace => {
                if self.search.backspace() {
                    self.refilter();
                }
                Command::None
            }
            Input::Left => {
                self.search.move_left();
                Command::None
            }
            Input::Right => {
                self.search.move_right();
                Command::None
            }
            Input::Home => {
                self.search.move_home();
                Command::None
            }
            Input::End => {
                self.search.move_end();
                Command::None
            }
        }
    }

    pub(super) fn handle_delete(&mut self, input: Input) -> Command {
        match input {
            Input::Action(Action::Cancel) => {
                self.mode = Mode::Normal;
                self.marked.clear();
            }
            Input::Action(Action::Select) => {
                if !self.marked.is_empty() {
                    self.mode = Mode::Confirm;
                    self.confirm_text.clear();
                }
            }
            Input::Action(Action::Up) => return self.move_up(),
            Input::Action(Action::Down) => return self.move_down(),
            Input::Action(Action::ToggleMark) => {
                if self.cursor < self.visible.len() && !self.marked.remove(&self.cursor) {
                    self.marked.insert(self.cursor);
                }
            }
            // text entry is inert while marking
            _ => {}
        }
        Command::None
    }

    pub(super) fn handle_confirm(&mut self, input: Input) -> Command {
        match input {
            Input::Action(Action::Cancel) => {
                self.mode = Mode::Delete;
                self.confirm_text.clear();
            }
            Input::Action(Action::Select) => {
                if self.confirm_text == CONFIRM_TOKEN {
                    let paths = self.marked_paths();
                    self.mode = Mode::Normal;
                    self.marked.clear();
                    self.confirm_text.clear();
                    debug!(count = paths.len(), "deletion confirmed");
                    return Command::Delete(paths);
                }
            }
            Input::Backspace => {
                self.confirm_text.pop();
            }
            Input::Char(ch) if !ch.is_control() => {
                self.confirm_text.extend(ch.to_uppercase());
            }
            _ => {}
        }
        Command::None
    }

    pub(super) fn on_catalog_loaded(&mut self, entries: Vec<WorkspaceEntry>) -> Command {
        self.all = entries;
        self.loaded = true;

        // Indices into the old snapshot mean nothing now.
        if !self.marked.is_empty() || self.mode == Mode::Confirm {
            self.marked.clear();
            self.confirm_text.clear();
            if self.mode == Mode::Confirm {
                self.mode = Mode::Delete;
            }
        }

        self.refilter();
        if self.mode == Mode::Delete && self.visible.is_empty() {
            self.mode = Mode::Normal;
        }
        Command::None
    }

    pub(super) fn on_delete_finished(&mut self, res: Result<usize, String>) -> Command {
        match res {
            Ok(count) => debug!(count, "deletion finished"),
            Err(reason) => self.notice = Some(format!("delete failed: {reason}")),
        }
        // a failed batch may still have removed some entries
        Command::Reload
    }

    pub(super) fn on_text_changed(&mut self, text: &str) -> Command {
        if self.mode == Mode::Normal {
            self.search.set(text);
            self.refilter();
        }
        Command::None
    }

    fn move_up(&mut self) -> Command {
        self.cursor = self.cursor.saturating_sub(1);
        Command::None
    }

    fn move_down(&mut self) -> Command {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
        Command::None
    }
}

#[cfg(test)]
mod tests {
    use crate::app::keymap::Action;
    use crate::app::state::{Command, Event, Input, Mode, Outcome, Session};
    use crate::core::WorkspaceEntry;

    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn entries(names: &[&str]) -> Vec<WorkspaceEntry> {
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                WorkspaceEntry::new(
                    n.to_string(),
                    PathBuf::from("/w").join(n),
                    base - Duration::from_secs(i as u64 * 60),
                )
            })
            .collect()
    }

    fn loaded(names: &[&str]) -> Session {
        let mut s = Session::new("/w", "");
        s.handle(Event::CatalogLoaded(entries(names)));
        s
    }

    fn key(s: &mut Session, action: Action) -> Command {
        s.handle(Event::Key(Input::Action(action)))
    }

    fn type_text(s: &mut Session, text: &str) {
        for ch in text.chars() {
            s.handle(Event::Key(Input::Char(ch)));
        }
    }

    #[test]
    fn down_clamps_at_last_entry() {
        let mut s = loaded(&["a", "b", "c"]);
        for _ in 0..3 {
            key(&mut s, Action::Down);
        }
        assert_eq!(s.cursor(), 2);
        for _ in 0..5 {
            key(&mut s, Action::Up);
        }
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn select_returns_path_under_cursor() {
        let mut s = loaded(&["2024-01-01-a", "2024-01-02-b"]);
        key(&mut s, Action::Down);
        assert_eq!(key(&mut s, Action::Select), Command::Quit);
        assert_eq!(
            s.outcome(),
            Some(&Outcome::Selected(PathBuf::from("/w/2024-01-02-b")))
        );
    }

    #[test]
    fn select_without_matches_requests_create() {
        let mut s = loaded(&["alpha"]);
        type_text(&mut s, "zzz");
        assert!(s.visible().is_empty());
        assert_eq!(key(&mut s, Action::Select), Command::Quit);
        assert_eq!(s.into_outcome(), Some(Outcome::Create("zzz".into())));
    }

    #[test]
    fn select_on_empty_catalog_and_query_is_noop() {
        let mut s = loaded(&[]);
        assert_eq!(key(&mut s, Action::Select), Command::None);
        assert!(!s.is_done());
    }

    #[test]
    fn typing_refilters_and_clamps_cursor() {
        let mut s = loaded(&["alpha", "beta", "gamma"]);
        key(&mut s, Action::Down);
        key(&mut s, Action::Down);
        type_text(&mut s, "alp");
        assert_eq!(s.visible().len(), 1);
        assert_eq!(s.cursor(), 0);

        s.handle(Event::Key(Input::Backspace));
        assert_eq!(s.query(), "al");
    }

    #[test]
    fn text_changed_is_inert_outside_normal() {
        let mut s = loaded(&["alpha", "beta"]);
        key(&mut s, Action::Delete);
        s.handle(Event::TextChanged("beta".into()));
        assert_eq!(s.query(), "");
        assert_eq!(s.visible().len(), 2);
    }

    #[test]
    fn delete_mode_requires_entries() {
        let mut s = loaded(&[]);
        key(&mut s, Action::Delete);
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn confirm_requires_exact_token() {
        let mut s = loaded(&["a", "b", "c"]);
        key(&mut s, Action::Delete);
        key(&mut s, Action::ToggleMark);
        key(&mut s, Action::Down);
        key(&mut s, Action::Down);
        key(&mut s, Action::ToggleMark);
        key(&mut s, Action::Select);
        assert_eq!(s.mode(), Mode::Confirm);
        assert_eq!(s.marked().iter().copied().collect::<Vec<_>>(), vec![0, 2]);

        // input is uppercased, so "yes" becomes "YES"
        type_text(&mut s, "yes");
        assert_eq!(s.confirm_text(), "YES");
        s.handle(Event::Key(Input::Backspace));
        type_text(&mut s, "z");
        assert_eq!(key(&mut s, Action::Select), Command::None);
        assert_eq!(s.mode(), Mode::Confirm);

        s.handle(Event::Key(Input::Backspace));
        type_text(&mut s, "S");
        let cmd = key(&mut s, Action::Select);
        assert_eq!(
            cmd,
            Command::Delete(vec![PathBuf::from("/w/a"), PathBuf::from("/w/c")])
        );
        assert_eq!(s.mode(), Mode::Normal);
        assert!(s.marked().is_empty());
        assert_eq!(s.confirm_text(), "");
    }

    #[test]
    fn escape_steps_back_through_modes() {
        let mut s = loaded(&["a", "b"]);
        key(&mut s, Action::Delete);
        key(&mut s, Action::ToggleMark);
        key(&mut s, Action::Select);
        type_text(&mut s, "ye");

        key(&mut s, Action::Cancel);
        assert_eq!(s.mode(), Mode::Delete);
        assert_eq!(s.marked().len(), 1);
        assert_eq!(s.confirm_text(), "");

        key(&mut s, Action::Cancel);
        assert_eq!(s.mode(), Mode::Normal);
        assert!(s.marked().is_empty());

        assert_eq!(key(&mut s, Action::Cancel), Command::Quit);
        assert!(s.is_done());
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn toggle_mark_twice_unmarks() {
        let mut s = loaded(&["a"]);
        key(&mut s, Action::Delete);
        key(&mut s, Action::ToggleMark);
        key(&mut s, Action::ToggleMark);
        assert!(s.marked().is_empty());
        assert_eq!(key(&mut s, Action::Select), Command::None);
        assert_eq!(s.mode(), Mode::Delete);
    }

    #[test]
    fn reload_clears_marks() {
        let mut s = loaded(&["a", "b"]);
        key(&mut s, Action::Delete);
        key(&mut s, Action::ToggleMark);
        key(&mut s, Action::Select);
        assert_eq!(s.mode(), Mode::Confirm);

        s.handle(Event::CatalogLoaded(entries(&["a", "b"])));
        assert_eq!(s.mode(), Mode::Delete);
        assert!(s.marked().is_empty());

        s.handle(Event::CatalogLoaded(Vec::new()));
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn load_failure_ends_session() {
        let mut s = Session::new("/w", "");
        assert_eq!(s.handle(Event::LoadFailed("boom".into())), Command::Quit);
        assert!(s.is_done());
        assert_eq!(s.outcome(), None);
        // late events are dropped
        assert_eq!(
            s.handle(Event::CatalogLoaded(entries(&["a"]))),
            Command::None
        );
        assert!(s.visible().is_empty());
    }

    #[test]
    fn failed_delete_sets_notice_and_reloads() {
        let mut s = loaded(&["a"]);
        let cmd = s.handle(Event::DeleteFinished(Err("permission denied".into())));
        assert_eq!(cmd, Command::Reload);
        assert_eq!(s.notice(), Some("delete failed: permission denied"));

        key(&mut s, Action::Down);
        assert_eq!(s.notice(), None);

        assert_eq!(s.handle(Event::DeleteFinished(Ok(1))), Command::Reload);
        assert_eq!(s.notice(), None);
    }
}
