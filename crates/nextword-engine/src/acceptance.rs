//! Merging an accepted suggestion into the text.

use crate::buffer::TextBufferState;
use crate::suggestion::Suggestion;

/// The buffer write requested by an acceptance: new content and caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Replacement content for the host input.
    pub content: String,
    /// Caret offset (chars) after the inserted word.
    pub caret: usize,
}

impl Commit {
    /// The commit as a buffer snapshot.
    pub fn to_buffer(&self) -> TextBufferState {
        TextBufferState::new(self.content.clone(), self.caret)
    }
}

/// Insert `suggestion` at the caret.
///
/// Text before the caret (including the trigger space) is kept as-is and the
/// word is appended right after it, followed by one space when `smart_space`
/// is on. Every acceptance path (Tab, Enter, Right, click) goes through here.
pub fn commit(buffer: &TextBufferState, suggestion: &Suggestion, smart_space: bool) -> Commit {
    let mut content = buffer.before_caret().to_owned();
    content.push_str(suggestion.word());
    let mut inserted = suggestion.word().chars().count();
    if smart_space {
        content.push(' ');
        inserted += 1;
    }
    Commit {
        content,
        caret: buffer.caret() + inserted,
    }
}
