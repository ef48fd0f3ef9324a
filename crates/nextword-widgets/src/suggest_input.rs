//! Text input with inline next-word suggestions.
//!
//! `SuggestInput` owns the text ([`TextEditState`]) and a
//! [`SuggestionEngine`]. Every edit and caret movement is reported to the
//! engine; keys the engine wants (Tab, arrows, Enter, Escape while a
//! suggestion is up) go to it instead of the text. The top suggestion is drawn
//! dimmed right after the caret, and while browsing a bordered list of ranked
//! words with their probabilities opens next to it.
//!
//! ```ignore
//! let input = SuggestInput::new(HttpPredictor::new(&PredictConfig::default())?)
//!     .with_config(EngineConfig::default().with_smart_space(false));
//! ```

use crate::geometry::{str_width, CellGeometry};
use crate::keymap::KeyMap;
use crate::text_edit::TextEditState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nextword_core::{Command, Component};
use nextword_engine::engine::Message as EngineMessage;
use nextword_engine::{
    EngineConfig, Geometry, Lifecycle, PositionAdapter, Predictor, SuggestionEngine,
};
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Drawn after the ghost word to hint that more suggestions exist.
pub const GHOST_MARKER: &str = "▼";

/// Messages for the suggest input.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press.
    Key(KeyEvent),
    /// Bracketed paste.
    Paste(String),
    /// A mouse click at a screen cell; `area` is where the input was drawn.
    Click {
        /// Screen column.
        column: u16,
        /// Screen row.
        row: u16,
        /// The input's area in the last frame.
        area: Rect,
    },
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
    /// Traffic to and from the engine.
    Engine(EngineMessage),
}

/// Style configuration.
#[derive(Debug, Clone)]
pub struct SuggestInputStyle {
    /// Typed text.
    pub text: Style,
    /// The caret cell.
    pub cursor: Style,
    /// Ghost suggestion and marker.
    pub ghost: Style,
    /// List border.
    pub border: Style,
    /// Unselected list entries.
    pub item: Style,
    /// The highlighted list entry.
    pub selected_item: Style,
}

impl Default for SuggestInputStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            ghost: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            border: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            selected_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Where the pieces of the input land inside an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Overlays {
    scroll: Position,
    caret: Position,
    ghost: Option<Rect>,
    list: Option<Rect>,
}

/// Multi-line text input bound to a suggestion engine.
pub struct SuggestInput {
    editor: TextEditState,
    engine: SuggestionEngine,
    keymap: KeyMap,
    style: SuggestInputStyle,
    focused: bool,
}

impl SuggestInput {
    /// Create an empty input that asks `predictor` for suggestions.
    pub fn new(predictor: impl Predictor) -> Self {
        Self {
            editor: TextEditState::new(),
            engine: SuggestionEngine::new(predictor),
            keymap: KeyMap::default(),
            style: SuggestInputStyle::default(),
            focused: true,
        }
    }

    /// Replace the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        // Configure never produces a command.
        let _ = self.engine.update(EngineMessage::Configure(config));
        self
    }

    /// Replace the key map.
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replace the style.
    pub fn with_style(mut self, style: SuggestInputStyle) -> Self {
        self.style = style;
        self
    }

    /// The text.
    pub fn value(&self) -> String {
        self.editor.value()
    }

    /// The editing state.
    pub fn editor(&self) -> &TextEditState {
        &self.editor
    }

    /// The engine, for reading its snapshot and configuration.
    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// The key map in use.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Replace the text, caret at the end, and tell the engine.
    pub fn set_value(&mut self, value: &str) -> Command<Message> {
        self.editor.set_value(value);
        self.edited()
    }

    /// Apply a new engine configuration.
    pub fn configure(&mut self, config: EngineConfig) -> Command<Message> {
        self.drive(EngineMessage::Configure(config))
    }

    /// Run one engine update. An accepted word is written into the editor
    /// before anything else can touch the text.
    fn drive(&mut self, msg: EngineMessage) -> Command<Message> {
        let cmd = self.engine.update(msg).map(Message::Engine);
        match self.engine.take_commit() {
            Some(commit) => {
                self.editor.apply(&commit);
                Command::batch([cmd, self.edited()])
            }
            None => cmd,
        }
    }

    fn edited(&mut self) -> Command<Message> {
        self.drive(EngineMessage::Input(self.editor.buffer()))
    }

    fn caret_moved(&mut self) -> Command<Message> {
        self.drive(EngineMessage::CaretMoved(self.editor.buffer()))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if let Some(suggest) = self.keymap.suggest_key(&key) {
            if self.engine.handles(suggest) {
                return self.drive(EngineMessage::Key(suggest));
            }
        }
        if self.keymap.delete_word.matches(&key) {
            return if self.editor.delete_word_back() {
                self.edited()
            } else {
                Command::none()
            };
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Command::none();
        }
        match key.code {
            KeyCode::Char(c) => {
                self.editor.insert_char(c);
                self.edited()
            }
            KeyCode::Enter => {
                self.editor.insert_char('\n');
                self.edited()
            }
            KeyCode::Backspace if self.editor.delete_back() => self.edited(),
            KeyCode::Delete if self.editor.delete_forward() => self.edited(),
            KeyCode::Left => self.move_caret(TextEditState::move_left),
            KeyCode::Right => self.move_caret(TextEditState::move_right),
            KeyCode::Up => self.move_caret(TextEditState::move_up),
            KeyCode::Down => self.move_caret(TextEditState::move_down),
            KeyCode::Home => self.move_caret(TextEditState::move_home),
            KeyCode::End => self.move_caret(TextEditState::move_end),
            _ => Command::none(),
        }
    }

    fn move_caret(&mut self, step: fn(&mut TextEditState)) -> Command<Message> {
        step(&mut self.editor);
        self.caret_moved()
    }

    fn handle_click(&mut self, column: u16, row: u16, area: Rect) -> Command<Message> {
        let click = Position::new(column, row);
        let overlays = self.overlays(area);
        if let Some(list) = overlays.list {
            if list.contains(click) {
                let inner = Block::default().borders(Borders::ALL).inner(list);
                if !inner.contains(click) {
                    return Command::none();
                }
                let index = usize::from(row - inner.y);
                return self.drive(EngineMessage::Pick(index));
            }
        }
        if !area.contains(click) {
            return Command::none();
        }
        let cell = Position::new(
            column - area.x + overlays.scroll.x,
            row - area.y + overlays.scroll.y,
        );
        let offset = CellGeometry.cell_to_offset(&self.editor.buffer(), cell);
        self.editor.set_cursor(offset);
        self.caret_moved()
    }

    fn ghost_text(&self) -> Option<String> {
        self.engine
            .state()
            .top()
            .map(|s| format!("{} {GHOST_MARKER}", s.word()))
    }

    fn list_rows(&self) -> Vec<(String, bool)> {
        let state = self.engine.state();
        let words = state.suggestions();
        let widest = words.iter().map(|s| str_width(s.word())).max().unwrap_or(0);
        words
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let selected = state.selected_index() == Some(i);
                let marker = if selected { "› " } else { "  " };
                let pad = " ".repeat(usize::from(widest - str_width(s.word())));
                let row = format!("{marker}{}{pad} {:>6}", s.word(), s.percent_label());
                (row, selected)
            })
            .collect()
    }

    fn overlays(&self, area: Rect) -> Overlays {
        let buffer = self.editor.buffer();
        let caret = CellGeometry.offset_to_cell(&buffer, buffer.caret());
        let scroll = Position::new(
            caret.x.saturating_sub(area.width.saturating_sub(1)),
            caret.y.saturating_sub(area.height.saturating_sub(1)),
        );
        let adapter =
            PositionAdapter::new(Size::new(area.width, area.height)).with_scroll(scroll);
        let to_screen = |r: Rect| Rect::new(area.x + r.x, area.y + r.y, r.width, r.height);

        let ghost = self
            .ghost_text()
            .map(|text| adapter.overlay(&CellGeometry, &buffer, str_width(&text)));
        let list = match ghost {
            Some(ghost) if self.engine.lifecycle() == Lifecycle::Browsing => {
                let rows = self.list_rows();
                let width = rows.iter().map(|(r, _)| str_width(r)).max().unwrap_or(0);
                let size = Size::new(width + 2, rows.len() as u16 + 2);
                Some(to_screen(adapter.list(ghost, size)))
            }
            _ => None,
        };
        Overlays {
            scroll,
            caret: Position::new(
                area.x + caret.x - scroll.x,
                area.y + caret.y - scroll.y,
            ),
            ghost: ghost.map(to_screen),
            list,
        }
    }
}

impl Component for SuggestInput {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) => self.handle_key(key),
            Message::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                if self.editor.insert_str(&text) == 0 {
                    return Command::none();
                }
                self.edited()
            }
            Message::Click { column, row, area } => self.handle_click(column, row, area),
            Message::Focus(focused) => {
                self.focused = focused;
                if focused {
                    Command::none()
                } else {
                    self.drive(EngineMessage::Blur)
                }
            }
            Message::Engine(msg) => self.drive(msg),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let overlays = self.overlays(area);

        let lines: Vec<Line> = self
            .editor
            .lines()
            .into_iter()
            .map(|l| Line::styled(l, self.style.text))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).scroll((overlays.scroll.y, overlays.scroll.x)),
            area,
        );

        if let (Some(rect), Some(text)) = (overlays.ghost, self.ghost_text()) {
            frame.render_widget(Paragraph::new(text).style(self.style.ghost), rect);
        }

        if self.focused && area.contains(overlays.caret) {
            if let Some(cell) = frame.buffer_mut().cell_mut(overlays.caret) {
                cell.set_style(self.style.cursor);
            }
        }

        if let Some(rect) = overlays.list {
            frame.render_widget(Clear, rect);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(self.style.border);
            let inner = block.inner(rect);
            frame.render_widget(block, rect);
            for (i, (row, selected)) in self.list_rows().into_iter().enumerate() {
                let y = inner.y + i as u16;
                if y >= inner.bottom() {
                    break;
                }
                let style = if selected {
                    self.style.selected_item
                } else {
                    self.style.item
                };
                let line_area = Rect::new(inner.x, y, inner.width, 1);
                frame.render_widget(Paragraph::new(row).style(style), line_area);
            }
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
