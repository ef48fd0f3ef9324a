//! The editor's status line: service health, text statistics and flags.
//!
//! Like a plain ratatui widget this holds no state between frames; the host
//! builds a [`StatusBar`] from its model in `view` and renders it.

use nextword_engine::{EngineConfig, Lifecycle};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::fmt;

/// Reachability of the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    /// No probe has finished yet.
    #[default]
    Checking,
    /// The last probe succeeded.
    Online,
    /// The last probe failed.
    Offline,
}

impl ServiceStatus {
    fn color(self) -> Color {
        match self {
            ServiceStatus::Checking => Color::Yellow,
            ServiceStatus::Online => Color::Green,
            ServiceStatus::Offline => Color::Red,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceStatus::Checking => "Checking",
            ServiceStatus::Online => "Online",
            ServiceStatus::Offline => "Offline",
        })
    }
}

/// Word and character counts of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Characters, including whitespace.
    pub chars: usize,
}

impl TextStats {
    /// Count `text`.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}

/// One-row status line with left, center and right sections.
pub struct StatusBar<'a> {
    left: Line<'a>,
    center: Line<'a>,
    right: Line<'a>,
    style: Style,
}

fn flag(name: &str, on: bool) -> String {
    format!("{name}: {}", if on { "on" } else { "off" })
}

impl StatusBar<'static> {
    /// The editor's standard status line.
    pub fn editor(
        service: ServiceStatus,
        stats: TextStats,
        config: &EngineConfig,
        lifecycle: Lifecycle,
    ) -> Self {
        let left = Line::from(vec![
            Span::raw("● ").style(Style::default().fg(service.color())),
            Span::raw(service.to_string()),
        ]);
        let center = Line::from(format!("{} words · {} chars", stats.words, stats.chars));
        let right = Line::from(format!(
            "{} · {} · {}ms · {lifecycle}",
            flag("auto", config.auto_suggest),
            flag("space", config.smart_space),
            config.debounce_delay_ms,
        ));
        Self {
            left,
            center,
            right,
            style: Style::default().bg(Color::DarkGray),
        }
    }
}

impl<'a> StatusBar<'a> {
    /// Set the base style of the whole row.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Render into `area` (one row is used).
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let row = Rect { height: 1.min(area.height), ..area };
        let [left, center, right] = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(45),
        ])
        .areas(row);

        frame.render_widget(Block::default().style(self.style), row);
        let sections = [
            (&self.left, left, Alignment::Left),
            (&self.center, center, Alignment::Center),
            (&self.right, right, Alignment::Right),
        ];
        for (line, area, alignment) in sections {
            let p = Paragraph::new(line.clone().patch_style(self.style)).alignment(alignment);
            frame.render_widget(p, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_words_and_chars() {
        assert_eq!(TextStats::of(""), TextStats { words: 0, chars: 0 });
        assert_eq!(
            TextStats::of("xin chào  bạn\n"),
            TextStats { words: 3, chars: 14 }
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(ServiceStatus::default().to_string(), "Checking");
        assert_eq!(ServiceStatus::Online.to_string(), "Online");
        assert_eq!(ServiceStatus::Offline.to_string(), "Offline");
    }

    #[test]
    fn editor_bar_shows_flags_and_lifecycle() {
        let config = EngineConfig::default().with_smart_space(false);
        let bar = StatusBar::editor(
            ServiceStatus::Online,
            TextStats::of("xin chao "),
            &config,
            Lifecycle::Inline,
        );
        assert_eq!(bar.center.to_string(), "2 words · 9 chars");
        assert_eq!(bar.right.to_string(), "auto: on · space: off · 300ms · inline");
        assert_eq!(bar.left.to_string(), "● Online");
    }
}
