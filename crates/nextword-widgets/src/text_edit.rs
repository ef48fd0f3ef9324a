//! Multi-line text buffer with a char-indexed caret.
//!
//! `TextEditState` is the host side of the editor: it owns the text, applies
//! edits and caret movement, and converts to and from the engine's
//! [`TextBufferState`] snapshot. Lines are separated by `'\n'`. There is no
//! undo history.

use nextword_engine::{Commit, TextBufferState};

/// Editable text and caret. Offsets count `char`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditState {
    chars: Vec<char>,
    cursor: usize,
}

impl TextEditState {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text as a `String`.
    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the text and put the caret at the end.
    pub fn set_value(&mut self, s: &str) {
        self.chars = s.chars().collect();
        self.cursor = self.chars.len();
    }

    /// The characters of the buffer.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Caret offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the caret, clamped to `0..=len`.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Snapshot for the engine.
    pub fn buffer(&self) -> TextBufferState {
        TextBufferState::new(self.value(), self.cursor)
    }

    /// Apply an accepted suggestion.
    pub fn apply(&mut self, commit: &Commit) {
        self.chars = commit.content.chars().collect();
        self.set_cursor(commit.caret);
    }

    /// Insert a character at the caret.
    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Insert a string at the caret. Returns the number of chars inserted.
    pub fn insert_str(&mut self, s: &str) -> usize {
        let before = self.chars.len();
        self.chars.splice(self.cursor..self.cursor, s.chars());
        let inserted = self.chars.len() - before;
        self.cursor += inserted;
        inserted
    }

    /// Backspace. Returns true if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete. Returns true if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the word before the caret and the whitespace after it (Ctrl+W).
    /// Stops at a line break.
    pub fn delete_word_back(&mut self) -> bool {
        let mut start = self.cursor;
        while start > 0 && matches!(self.chars[start - 1], ' ' | '\t') {
            start -= 1;
        }
        while start > 0 && !self.chars[start - 1].is_whitespace() {
            start -= 1;
        }
        if start == self.cursor {
            return self.delete_back();
        }
        self.chars.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Move one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move one character right.
    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    /// Move to the start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// Move to the end of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Move to the same column on the previous line, or to the start of the
    /// text on the first line.
    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        self.cursor = (prev_start + column).min(start - 1);
    }

    /// Move to the same column on the next line, or to the end of the text on
    /// the last line.
    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.chars.len() {
            self.cursor = end;
            return;
        }
        let column = self.cursor - self.line_start(self.cursor);
        let next_start = end + 1;
        self.cursor = (next_start + column).min(self.line_end(next_start));
    }

    /// Zero-based (line, column) of the caret.
    pub fn line_col(&self) -> (usize, usize) {
        let line = self.chars[..self.cursor].iter().filter(|&&c| c == '\n').count();
        (line, self.cursor - self.line_start(self.cursor))
    }

    /// The text split into lines. Always at least one (possibly empty) line.
    pub fn lines(&self) -> Vec<String> {
        self.value().split('\n').map(str::to_owned).collect()
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    fn line_start(&self, pos: usize) -> usize {
        self.chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.chars[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| pos + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, cursor: usize) -> TextEditState {
        let mut state = TextEditState::new();
        state.set_value(text);
        state.set_cursor(cursor);
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = TextEditState::new();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.lines(), vec![String::new()]);
    }

    #[test]
    fn insert_counts_chars_not_bytes() {
        let mut state = TextEditState::new();
        state.insert_str("xin chào");
        state.insert_char(' ');
        assert_eq!(state.value(), "xin chào ");
        assert_eq!(state.cursor(), 9);
        assert!(state.buffer().caret_at_end());
    }

    #[test]
    fn insert_in_the_middle() {
        let mut state = state("hd", 1);
        assert_eq!(state.insert_str("ello worl"), 9);
        assert_eq!(state.value(), "hello world");
        assert_eq!(state.cursor(), 10);
    }

    #[test]
    fn delete_back_and_forward() {
        let mut state = state("abc", 1);
        assert!(state.delete_back());
        assert_eq!(state.value(), "bc");
        assert!(!state.delete_back());
        assert!(state.delete_forward());
        assert_eq!(state.value(), "c");
        state.move_end();
        assert!(!state.delete_forward());
    }

    #[test]
    fn delete_word_back_removes_word_and_trailing_space() {
        let mut state = state("xin chao ban ", 13);
        assert!(state.delete_word_back());
        assert_eq!(state.value(), "xin chao ");
        assert!(state.delete_word_back());
        assert_eq!(state.value(), "xin ");
    }

    #[test]
    fn delete_word_back_stops_at_line_break() {
        let mut state = state("one\ntwo", 7);
        state.delete_word_back();
        assert_eq!(state.value(), "one\n");
        state.delete_word_back();
        assert_eq!(state.value(), "one");
    }

    #[test]
    fn home_and_end_are_per_line() {
        let mut state = state("first\nsecond", 8);
        state.move_home();
        assert_eq!(state.cursor(), 6);
        state.move_end();
        assert_eq!(state.cursor(), 12);
    }

    #[test]
    fn up_and_down_keep_column() {
        let mut state = state("abcdef\nxy\nlonger", 4);
        state.move_down();
        assert_eq!(state.line_col(), (1, 2));
        state.move_down();
        assert_eq!(state.line_col(), (2, 2));
        state.move_up();
        state.move_up();
        assert_eq!(state.line_col(), (0, 2));
        state.move_up();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn down_on_last_line_goes_to_end() {
        let mut state = state("a\nbc", 2);
        state.move_down();
        assert_eq!(state.cursor(), 4);
    }

    #[test]
    fn apply_commit() {
        let mut state = state("xin chao ", 9);
        state.apply(&Commit {
            content: "xin chao ban ".into(),
            caret: 13,
        });
        assert_eq!(state.buffer(), TextBufferState::at_end("xin chao ban "));
    }

    #[test]
    fn set_cursor_clamps() {
        let mut state = state("hi", 0);
        state.set_cursor(100);
        assert_eq!(state.cursor(), 2);
    }
}
