//! One-line key binding help.

use crate::keymap::Binding;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Styles for the help line.
#[derive(Debug, Clone)]
pub struct HelpStyle {
    /// Key labels.
    pub key: Style,
    /// Descriptions.
    pub description: Style,
    /// Separator between entries.
    pub separator: Style,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            key: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            description: Style::default().fg(Color::Gray),
            separator: Style::default().fg(Color::DarkGray),
        }
    }
}

const SEPARATOR: &str = " \u{2022} ";

/// `tab accept • ↓ suggestions • ...` for the given bindings.
pub fn help_line(bindings: &[&Binding], style: &HelpStyle) -> Line<'static> {
    let mut spans = Vec::with_capacity(bindings.len() * 4);
    for (i, binding) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, style.separator));
        }
        spans.push(Span::styled(binding.keys_label(), style.key));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(binding.description.clone(), style.description));
    }
    Line::from(spans)
}
