//! Single-line text input used for the search box.
//!
//! Stores the buffer and a byte cursor that always sits on a char boundary.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchInput {
    buffer: String,
    cursor: usize,
}

impl SearchInput {
    /// Creates an input holding `initial` with the cursor at the end.
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    // Getters / accessors

    #[inline]
    pub fn value(&self) -> &str {
        &self.buffer
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Cursor position as a byte offset into [SearchInput::value].
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal cells between the start of the input and the cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    // Editing

    /// Replaces the whole buffer, cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.cursor = self.buffer.len();
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor. Returns false if there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(previous);
            self.cursor = previous;
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = previous;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut input = SearchInput::new("ac");
        input.move_left();
        input.insert('b');
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 2);

        assert!(input.backspace());
        assert_eq!(input.value(), "ac");
        input.move_home();
        assert!(!input.backspace());
        assert_eq!(input.value(), "ac");
    }

    #[test]
    fn cursor_moves_by_whole_chars() {
        let mut input = SearchInput::new("äö");
        assert_eq!(input.cursor(), 4);
        input.move_left();
        assert_eq!(input.cursor(), 2);
        input.insert('x');
        assert_eq!(input.value(), "äxö");
        input.move_end();
        input.move_right();
        assert_eq!(input.cursor(), input.value().len());
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn cursor_column_counts_cells() {
        let mut input = SearchInput::new("🦀a");
        assert_eq!(input.cursor_column(), 3);
        input.move_left();
        assert_eq!(input.cursor_column(), 2);
        input.set("new");
        assert_eq!(input.cursor_column(), 3);
    }
}
