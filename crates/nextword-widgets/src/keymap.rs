//! Key bindings of the suggestion editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nextword_engine::SuggestKey;

/// A single key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key with Alt held.
    pub fn alt(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::ALT,
        }
    }

    /// A key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Short label for help text, e.g. `ctrl+t` or `↓`.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Tab => "tab".to_owned(),
            KeyCode::Enter => "enter".to_owned(),
            KeyCode::Esc => "esc".to_owned(),
            KeyCode::Up => "↑".to_owned(),
            KeyCode::Down => "↓".to_owned(),
            KeyCode::Left => "←".to_owned(),
            KeyCode::Right => "→".to_owned(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}").to_lowercase(),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("ctrl+{key}")
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("alt+{key}")
        } else {
            key
        }
    }
}

/// One or more key combinations bound to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the binding.
    pub keys: Vec<KeyCombination>,
    /// What the binding does, for the help line.
    pub description: String,
}

impl Binding {
    /// A binding for a single key.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// A binding for several keys.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
        }
    }

    /// Whether `event` presses one of the binding's keys. Extra modifiers
    /// beyond the required ones are not allowed, so Ctrl+Enter is not Enter.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        self.keys
            .iter()
            .any(|k| k.code == event.code && modifiers == k.modifiers)
    }

    /// Keys joined for display, e.g. `enter/→`.
    pub fn keys_label(&self) -> String {
        self.keys
            .iter()
            .map(KeyCombination::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Every binding the editor reacts to, besides plain text editing.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Accept the ghost suggestion.
    pub accept: Binding,
    /// Open the list / next entry.
    pub next: Binding,
    /// Previous entry.
    pub previous: Binding,
    /// Commit the highlighted entry.
    pub commit: Binding,
    /// Commit the highlighted entry (alternative key).
    pub commit_right: Binding,
    /// Close the list.
    pub dismiss: Binding,
    /// Delete the previous word.
    pub delete_word: Binding,
    /// Toggle auto-suggest.
    pub toggle_auto_suggest: Binding,
    /// Toggle smart spacing.
    pub toggle_smart_space: Binding,
    /// Wait longer before requesting suggestions.
    pub slower_suggestions: Binding,
    /// Wait less before requesting suggestions.
    pub faster_suggestions: Binding,
    /// Leave the program.
    pub quit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            accept: Binding::new(KeyCombination::new(KeyCode::Tab), "accept"),
            next: Binding::new(KeyCombination::new(KeyCode::Down), "suggestions"),
            previous: Binding::new(KeyCombination::new(KeyCode::Up), "previous"),
            commit: Binding::new(KeyCombination::new(KeyCode::Enter), "choose"),
            commit_right: Binding::new(KeyCombination::new(KeyCode::Right), "choose"),
            dismiss: Binding::new(KeyCombination::new(KeyCode::Esc), "close list"),
            delete_word: Binding::new(KeyCombination::ctrl(KeyCode::Char('w')), "delete word"),
            toggle_auto_suggest: Binding::new(
                KeyCombination::ctrl(KeyCode::Char('t')),
                "auto-suggest",
            ),
            toggle_smart_space: Binding::new(
                KeyCombination::ctrl(KeyCode::Char('s')),
                "smart space",
            ),
            slower_suggestions: Binding::with_keys(
                vec![
                    KeyCombination::alt(KeyCode::Char('=')),
                    KeyCombination::alt(KeyCode::Char('+')),
                ],
                "slower",
            ),
            faster_suggestions: Binding::new(KeyCombination::alt(KeyCode::Char('-')), "faster"),
            quit: Binding::with_keys(
                vec![
                    KeyCombination::ctrl(KeyCode::Char('c')),
                    KeyCombination::ctrl(KeyCode::Char('q')),
                ],
                "quit",
            ),
        }
    }
}

impl KeyMap {
    /// The engine key `event` maps to, whether or not the engine wants it
    /// right now.
    pub fn suggest_key(&self, event: &KeyEvent) -> Option<SuggestKey> {
        [
            (&self.accept, SuggestKey::Accept),
            (&self.next, SuggestKey::Next),
            (&self.previous, SuggestKey::Previous),
            (&self.commit, SuggestKey::Commit),
            (&self.commit_right, SuggestKey::CommitRight),
            (&self.dismiss, SuggestKey::Dismiss),
        ]
        .into_iter()
        .find(|(binding, _)| binding.matches(event))
        .map(|(_, key)| key)
    }

    /// Bindings shown in the help line, in display order.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.accept,
            &self.next,
            &self.commit,
            &self.dismiss,
            &self.toggle_auto_suggest,
            &self.toggle_smart_space,
            &self.quit,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn suggestion_keys() {
        let map = KeyMap::default();
        let cases = [
            (KeyCode::Tab, SuggestKey::Accept),
            (KeyCode::Down, SuggestKey::Next),
            (KeyCode::Up, SuggestKey::Previous),
            (KeyCode::Enter, SuggestKey::Commit),
            (KeyCode::Right, SuggestKey::CommitRight),
            (KeyCode::Esc, SuggestKey::Dismiss),
        ];
        for (code, expected) in cases {
            assert_eq!(map.suggest_key(&press(code, KeyModifiers::NONE)), Some(expected));
        }
        assert_eq!(map.suggest_key(&press(KeyCode::Left, KeyModifiers::NONE)), None);
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let map = KeyMap::default();
        assert_eq!(map.suggest_key(&press(KeyCode::Enter, KeyModifiers::CONTROL)), None);
        assert!(map.quit.matches(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!map.quit.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn delay_keys_need_alt() {
        let map = KeyMap::default();
        assert!(map.slower_suggestions.matches(&press(KeyCode::Char('='), KeyModifiers::ALT)));
        assert!(map.slower_suggestions.matches(&press(KeyCode::Char('+'), KeyModifiers::ALT | KeyModifiers::SHIFT)));
        assert!(map.faster_suggestions.matches(&press(KeyCode::Char('-'), KeyModifiers::ALT)));
        assert!(!map.faster_suggestions.matches(&press(KeyCode::Char('-'), KeyModifiers::NONE)));
    }

    #[test]
    fn labels() {
        let map = KeyMap::default();
        assert_eq!(map.accept.keys_label(), "tab");
        assert_eq!(map.quit.keys_label(), "ctrl+c/ctrl+q");
        assert_eq!(map.next.keys_label(), "↓");
        assert_eq!(map.faster_suggestions.keys_label(), "alt+-");
    }
}
