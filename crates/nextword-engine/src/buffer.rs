//! Snapshot of the host editor's text and caret.

/// The content of the host input and the caret position within it.
///
/// Offsets count `char`s, not bytes, so a caret never lands inside a
/// multi-byte character. The caret is clamped to `0..=len` on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBufferState {
    content: String,
    caret: usize,
}

impl TextBufferState {
    /// Create a snapshot, clamping `caret` to the content length.
    pub fn new(content: impl Into<String>, caret: usize) -> Self {
        let content = content.into();
        let len = content.chars().count();
        Self {
            content,
            caret: caret.min(len),
        }
    }

    /// Snapshot with the caret at the end of `content`.
    pub fn at_end(content: impl Into<String>) -> Self {
        let content = content.into();
        let caret = content.chars().count();
        Self { content, caret }
    }

    /// The full text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Caret offset in chars.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Length of the content in chars.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the caret sits after the last character.
    pub fn caret_at_end(&self) -> bool {
        self.caret == self.len()
    }

    /// The text before the caret.
    pub fn before_caret(&self) -> &str {
        &self.content[..self.byte_offset(self.caret)]
    }

    /// Byte index of a char offset, saturating at the end of the content.
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(offset)
            .map_or(self.content.len(), |(i, _)| i)
    }
}
