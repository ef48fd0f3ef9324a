//! The suggestion lifecycle: `Idle -> Pending -> Inline <-> Browsing`.
//!
//! [`SuggestionState`] is the only place visibility changes. Its methods are
//! the allowed transitions; each one checks the current lifecycle and is a
//! no-op (returning `false` / `None`) when called from the wrong state, so
//! the invariants below hold no matter what order events arrive in:
//!
//! - `Idle` holds no suggestions;
//! - `Inline` and `Browsing` always hold at least one;
//! - the selected index is in range whenever it is defined.

use crate::buffer::TextBufferState;
use crate::navigation;
use crate::suggestion::Suggestion;
use std::fmt;

/// Where the suggestion UI currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Nothing shown, nothing requested.
    #[default]
    Idle,
    /// A request is debouncing or in flight; nothing shown.
    Pending,
    /// The top suggestion is shown as ghost text at the caret.
    Inline,
    /// The ranked list is open with one entry highlighted.
    Browsing,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lifecycle::Idle => "idle",
            Lifecycle::Pending => "pending",
            Lifecycle::Inline => "inline",
            Lifecycle::Browsing => "browsing",
        })
    }
}

/// Lifecycle plus the ranked suggestions and the highlighted entry.
#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    lifecycle: Lifecycle,
    suggestions: Vec<Suggestion>,
    selected: usize,
    anchor: Option<TextBufferState>,
}

impl SuggestionState {
    /// A fresh, idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The ranked suggestions (empty unless `Inline` or `Browsing`).
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// The highlighted index; only defined while browsing.
    pub fn selected_index(&self) -> Option<usize> {
        (self.lifecycle == Lifecycle::Browsing).then_some(self.selected)
    }

    /// The suggestion shown as ghost text.
    pub fn top(&self) -> Option<&Suggestion> {
        if self.is_showing() {
            self.suggestions.first()
        } else {
            None
        }
    }

    /// Whether a suggestion is visible (`Inline` or `Browsing`).
    pub fn is_showing(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Inline | Lifecycle::Browsing)
    }

    /// The buffer the visible suggestions were fetched for.
    pub fn anchor(&self) -> Option<&TextBufferState> {
        self.anchor.as_ref().filter(|_| self.is_showing())
    }

    /// A new request was issued: show nothing until it resolves.
    pub fn begin_request(&mut self) {
        self.clear();
        self.lifecycle = Lifecycle::Pending;
    }

    /// Apply a resolved request. A non-empty list goes `Inline`; an empty one
    /// goes `Idle`. Ignored unless `Pending`.
    pub fn apply_suggestions(&mut self, suggestions: Vec<Suggestion>, anchor: TextBufferState) -> bool {
        if self.lifecycle != Lifecycle::Pending {
            return false;
        }
        if suggestions.is_empty() {
            self.reset();
        } else {
            self.suggestions = suggestions;
            self.selected = 0;
            self.anchor = Some(anchor);
            self.lifecycle = Lifecycle::Inline;
        }
        true
    }

    /// Open the ranked list with the first entry highlighted.
    pub fn open_browsing(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Inline {
            return false;
        }
        self.selected = 0;
        self.lifecycle = Lifecycle::Browsing;
        true
    }

    /// Close the list but keep the ghost text.
    pub fn close_browsing(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Browsing {
            return false;
        }
        self.selected = 0;
        self.lifecycle = Lifecycle::Inline;
        true
    }

    /// Highlight the next entry, wrapping around.
    pub fn select_next(&mut self) -> Option<usize> {
        self.navigate(navigation::next)
    }

    /// Highlight the previous entry, wrapping around.
    pub fn select_previous(&mut self) -> Option<usize> {
        self.navigate(navigation::previous)
    }

    fn navigate(&mut self, step: fn(usize, usize) -> Option<usize>) -> Option<usize> {
        if self.lifecycle != Lifecycle::Browsing {
            return None;
        }
        let index = step(self.selected, self.suggestions.len())?;
        self.selected = index;
        Some(index)
    }

    /// Take the suggestion at `index` for acceptance and return to `Idle`.
    ///
    /// Returns `None` (and changes nothing) unless a suggestion is visible
    /// and `index` is in range.
    pub fn take(&mut self, index: usize) -> Option<Suggestion> {
        if !self.is_showing() || index >= self.suggestions.len() {
            return None;
        }
        let chosen = self.suggestions.swap_remove(index);
        self.reset();
        Some(chosen)
    }

    /// The entry an Enter/Right press would commit: the highlighted one while
    /// browsing, the top one while inline.
    pub fn active_index(&self) -> Option<usize> {
        match self.lifecycle {
            Lifecycle::Browsing => Some(self.selected),
            Lifecycle::Inline => Some(0),
            Lifecycle::Idle | Lifecycle::Pending => None,
        }
    }

    /// Back to `Idle`, dropping everything.
    pub fn reset(&mut self) {
        self.clear();
        self.lifecycle = Lifecycle::Idle;
    }

    fn clear(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
        self.anchor = None;
    }
}
