//! Decides whether the caret is at a position that may request a suggestion.
//!
//! A position is eligible when all of these hold:
//!
//! 1. the caret is at the very end of the text (suggestions are never offered
//!    mid-document);
//! 2. the text ends with exactly one space;
//! 3. the token directly before that space is non-empty and contains at least
//!    one letter (ASCII or Latin, including Vietnamese diacritic letters).
//!
//! Every input, key, click and caret-move event goes through
//! [`is_eligible`] before a request is issued or a suggestion is shown.

use crate::buffer::TextBufferState;

/// Whether `buffer` is a trigger position.
pub fn is_eligible(buffer: &TextBufferState) -> bool {
    buffer.caret_at_end() && trigger_word(buffer.content()).is_some()
}

/// The word preceding the single trailing space, if the text ends with one.
///
/// Returns `None` for text that does not end in exactly one space, or whose
/// last token has no letters (`"123 "`, `"!? "`).
pub fn trigger_word(content: &str) -> Option<&str> {
    let body = content.strip_suffix(' ')?;
    let last = body.chars().next_back()?;
    if last.is_whitespace() {
        return None;
    }
    let start = body
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word = &body[start..];
    word.chars().any(is_word_letter).then_some(word)
}

/// ASCII letters plus the Latin-1 / Latin Extended / Latin Extended Additional
/// letters (U+00C0..=U+1EF9), which covers every Vietnamese diacritic form.
fn is_word_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{C0}'..='\u{1EF9}').contains(&c) && c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible(content: &str) -> bool {
        is_eligible(&TextBufferState::at_end(content))
    }

    #[test]
    fn single_space_after_word_is_eligible() {
        assert!(eligible("xin chao "));
        assert!(eligible("a "));
        assert!(eligible("tôi "));
        assert!(eligible("Chiếc lá "));
        assert!(eligible("dòng một\nhai "));
    }

    #[test]
    fn caret_not_at_end_is_never_eligible() {
        for caret in 0..9 {
            assert!(!is_eligible(&TextBufferState::new("xin chao ", caret)));
        }
    }

    #[test]
    fn two_or_more_trailing_spaces_are_rejected() {
        assert!(!eligible("xin chao  "));
        assert!(!eligible("xin chao   "));
    }

    #[test]
    fn missing_trailing_space_is_rejected() {
        assert!(!eligible("xin chao"));
        assert!(!eligible(""));
        assert!(!eligible(" "));
    }

    #[test]
    fn whitespace_before_the_space_is_rejected() {
        assert!(!eligible("xin\n "));
        assert!(!eligible("xin\t "));
    }

    #[test]
    fn token_needs_a_letter() {
        assert!(!eligible("123 "));
        assert!(!eligible("hello !? "));
        assert!(!eligible("× "));
        assert!(eligible("a1 "));
        assert!(eligible("(đi) "));
    }

    #[test]
    fn trigger_word_returns_last_token() {
        assert_eq!(trigger_word("xin chao "), Some("chao"));
        assert_eq!(trigger_word("một\nhai "), Some("hai"));
        assert_eq!(trigger_word("chao  "), None);
    }
}
