//! Key mapping for gotry
//!
//! Parses key strings from the config into [Key]s, and translates crossterm key events into
//! session [Input]s depending on the current [Mode].

use crate::app::state::{Input, Mode};
use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Every bindable action of the picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Select,
    Up,
    Down,
    Cancel,
    Delete,
    ToggleMark,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
///
/// Delete mode has its own table that is consulted first, so one key can enter delete mode
/// and then toggle marks inside it.
pub struct Keymap {
    map: HashMap<Key, Action>,
    delete_map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` config section
    #[rustfmt::skip]
    pub fn from_config(keys: &Keys) -> Self {
        let mut map = HashMap::new();
        let mut delete_map = HashMap::new();

        bind(keys.select(),      Action::Select, &mut map);
        bind(keys.up(),          Action::Up,     &mut map);
        bind(keys.down(),        Action::Down,   &mut map);
        bind(keys.cancel(),      Action::Cancel, &mut map);
        bind(keys.delete(),      Action::Delete, &mut map);

        bind(keys.toggle_mark(), Action::ToggleMark, &mut delete_map);

        Keymap { map, delete_map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent, mode: Mode) -> Option<Action> {
        if mode == Mode::Delete
            && let Some(action) = lookup_in(&self.delete_map, key)
        {
            return Some(action);
        }
        lookup_in(&self.map, key)
    }

    /// Translates a key event into a session input.
    ///
    /// In Normal and Confirm mode plain printable characters are always text, so bindings
    /// only apply to keys with modifiers or to non-character keys.
    pub fn translate(&self, key: KeyEvent, mode: Mode) -> Option<Input> {
        if mode != Mode::Delete
            && let KeyCode::Char(c) = key.code
            && (key.modifiers - KeyModifiers::SHIFT).is_empty()
        {
            return Some(Input::Char(c));
        }

        if let Some(action) = self.lookup(key, mode) {
            return Some(Input::Action(action));
        }

        match key.code {
            KeyCode::Backspace => Some(Input::Backspace),
            KeyCode::Left => Some(Input::Left),
            KeyCode::Right => Some(Input::Right),
            KeyCode::Home => Some(Input::Home),
            KeyCode::End => Some(Input::End),
            KeyCode::Char(c) if (key.modifiers - KeyModifiers::SHIFT).is_empty() => {
                Some(Input::Char(c))
            }
            _ => None,
        }
    }
}

fn lookup_in(map: &HashMap<Key, Action>, key: KeyEvent) -> Option<Action> {
    let k = Key {
        code: key.code,
        modifiers: key.modifiers,
    };

    if let Some(action) = map.get(&k).copied() {
        return Some(action);
    }

    if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
        let k2 = Key {
            code: key.code,
            modifiers: key.modifiers - KeyModifiers::SHIFT,
        };
        return map.get(&k2).copied();
    }
    None
}

/// Parses `"ctrl+p"`, `"<c-d>"`, `"space"`, `"esc"`, `"F2"` and single characters.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    for part in input.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "enter" | "return" => code = Some(KeyCode::Enter),
            "esc" | "escape" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparseable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_key_notations() {
        let ctrl_p = Key {
            code: KeyCode::Char('p'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(parse_key("ctrl+p"), Some(ctrl_p));
        assert_eq!(parse_key("<c-p>"), Some(ctrl_p));
        assert_eq!(parse_key("Ctrl+P").map(|k| k.modifiers), Some(KeyModifiers::CONTROL));
        assert_eq!(parse_key("space").map(|k| k.code), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("esc").map(|k| k.code), Some(KeyCode::Esc));
        assert_eq!(parse_key("f5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("<x-d>"), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn default_bindings_translate() {
        let km = Keymap::from_config(&Keys::default());

        assert_eq!(
            km.translate(ev(KeyCode::Enter, KeyModifiers::NONE), Mode::Normal),
            Some(Input::Action(Action::Select))
        );
        assert_eq!(
            km.translate(ev(KeyCode::Char('p'), KeyModifiers::CONTROL), Mode::Normal),
            Some(Input::Action(Action::Up))
        );
        assert_eq!(
            km.translate(ev(KeyCode::Char('n'), KeyModifiers::CONTROL), Mode::Delete),
            Some(Input::Action(Action::Down))
        );
        assert_eq!(
            km.translate(ev(KeyCode::Char('c'), KeyModifiers::CONTROL), Mode::Confirm),
            Some(Input::Action(Action::Cancel))
        );
        assert_eq!(
            km.translate(ev(KeyCode::Esc, KeyModifiers::NONE), Mode::Normal),
            Some(Input::Action(Action::Cancel))
        );
    }

    #[test]
    fn ctrl_d_depends_on_mode() {
        let km = Keymap::from_config(&Keys::default());
        let ctrl_d = ev(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(
            km.translate(ctrl_d, Mode::Normal),
            Some(Input::Action(Action::Delete))
        );
        assert_eq!(
            km.translate(ctrl_d, Mode::Delete),
            Some(Input::Action(Action::ToggleMark))
        );
    }

    #[test]
    fn space_is_text_outside_delete_mode() {
        let km = Keymap::from_config(&Keys::default());
        let space = ev(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(km.translate(space, Mode::Normal), Some(Input::Char(' ')));
        assert_eq!(km.translate(space, Mode::Confirm), Some(Input::Char(' ')));
        assert_eq!(
            km.translate(space, Mode::Delete),
            Some(Input::Action(Action::ToggleMark))
        );
    }

    #[test]
    fn shifted_chars_are_text() {
        let km = Keymap::from_config(&Keys::default());
        assert_eq!(
            km.translate(ev(KeyCode::Char('Y'), KeyModifiers::SHIFT), Mode::Confirm),
            Some(Input::Char('Y'))
        );
        assert_eq!(
            km.translate(ev(KeyCode::Left, KeyModifiers::NONE), Mode::Normal),
            Some(Input::Left)
        );
        assert_eq!(
            km.translate(ev(KeyCode::F(1), KeyModifiers::NONE), Mode::Normal),
            None
        );
    }
}
