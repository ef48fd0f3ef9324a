//! The editor application: one suggest input, a status line and a help line.

use crate::config::AppConfig;
use crossterm::event::{KeyEvent, MouseButton, MouseEventKind};
use nextword_core::{
    subscribe, terminal_events, Command, Component, Every, Model, Subscription, TerminalEvent,
};
use nextword_engine::{HealthProbe, PredictError, Predictor};
use nextword_widgets::help::{help_line, HelpStyle};
use nextword_widgets::suggest_input::{self, SuggestInput};
use nextword_widgets::{ServiceStatus, StatusBar, TextStats};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::sync::Arc;
use std::time::Duration;

/// How often the prediction service's health is probed.
pub const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Everything the editor needs at startup.
pub struct AppFlags {
    /// Resolved configuration.
    pub config: AppConfig,
    /// Where predictions come from.
    pub predictor: Arc<dyn Predictor>,
    /// Liveness probe for the status line.
    pub health: Arc<dyn HealthProbe>,
    /// Initial terminal size (columns, rows).
    pub size: (u16, u16),
}

impl AppFlags {
    /// Bundle a configuration with its collaborators.
    pub fn new(config: AppConfig, predictor: impl Predictor, health: impl HealthProbe) -> Self {
        Self {
            config,
            predictor: Arc::new(predictor),
            health: Arc::new(health),
            size: (80, 24),
        }
    }

    /// Set the initial terminal size.
    pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
        self.size = (columns, rows);
        self
    }
}

/// Application messages.
#[derive(Debug)]
pub enum Msg {
    /// Raw terminal input.
    Event(TerminalEvent),
    /// Forwarded to the input.
    Input(suggest_input::Message),
    /// Time to probe the service.
    HealthTick,
    /// A probe finished.
    Health(Result<(), PredictError>),
}

/// Screen areas of one frame.
struct Areas {
    editor: Rect,
    input: Rect,
    status: Rect,
    help: Rect,
}

fn areas(screen: Rect) -> Areas {
    let [editor, status, help] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(screen);
    Areas {
        editor,
        input: editor_block().inner(editor),
        status,
        help,
    }
}

fn editor_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" nextword ")
}

/// The editor model.
pub struct EditorApp {
    input: SuggestInput,
    health: Arc<dyn HealthProbe>,
    service: ServiceStatus,
    screen: Rect,
}

impl EditorApp {
    /// The suggest input.
    pub fn input(&self) -> &SuggestInput {
        &self.input
    }

    /// Last known health of the prediction service.
    pub fn service(&self) -> ServiceStatus {
        self.service
    }

    fn probe(&self) -> Command<Msg> {
        Command::perform(self.health.check(), Msg::Health)
    }

    fn forward(&mut self, msg: suggest_input::Message) -> Command<Msg> {
        self.input.update(msg).map(Msg::Input)
    }

    fn key(&mut self, key: KeyEvent) -> Command<Msg> {
        let keymap = self.input.keymap();
        if keymap.quit.matches(&key) {
            tracing::info!("quit requested");
            return Command::quit();
        }
        if keymap.toggle_auto_suggest.matches(&key) {
            let config = self.input.engine().config().clone();
            let enabled = !config.auto_suggest;
            tracing::info!(enabled, "auto-suggest toggled");
            return self.input.configure(config.with_auto_suggest(enabled)).map(Msg::Input);
        }
        if keymap.toggle_smart_space.matches(&key) {
            let config = self.input.engine().config().clone();
            let enabled = !config.smart_space;
            tracing::info!(enabled, "smart space toggled");
            return self.input.configure(config.with_smart_space(enabled)).map(Msg::Input);
        }
        if keymap.slower_suggestions.matches(&key) {
            let config = self.input.engine().config().clone().slower();
            tracing::info!(delay_ms = config.debounce_delay_ms, "suggestion delay changed");
            return self.input.configure(config).map(Msg::Input);
        }
        if keymap.faster_suggestions.matches(&key) {
            let config = self.input.engine().config().clone().faster();
            tracing::info!(delay_ms = config.debounce_delay_ms, "suggestion delay changed");
            return self.input.configure(config).map(Msg::Input);
        }
        self.forward(suggest_input::Message::Key(key))
    }

    fn event(&mut self, event: TerminalEvent) -> Command<Msg> {
        match event {
            TerminalEvent::Key(key) => self.key(key),
            TerminalEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.forward(suggest_input::Message::Click {
                        column: mouse.column,
                        row: mouse.row,
                        area: areas(self.screen).input,
                    })
                }
                _ => Command::none(),
            },
            TerminalEvent::Resize(columns, rows) => {
                self.screen = Rect::new(0, 0, columns, rows);
                Command::none()
            }
            TerminalEvent::FocusGained => self.forward(suggest_input::Message::Focus(true)),
            TerminalEvent::FocusLost => self.forward(suggest_input::Message::Focus(false)),
            TerminalEvent::Paste(text) => self.forward(suggest_input::Message::Paste(text)),
        }
    }
}

impl Model for EditorApp {
    type Message = Msg;
    type Flags = AppFlags;

    fn init(flags: AppFlags) -> (Self, Command<Msg>) {
        let (columns, rows) = flags.size;
        let app = EditorApp {
            input: SuggestInput::new(flags.predictor).with_config(flags.config.engine),
            health: flags.health,
            service: ServiceStatus::Checking,
            screen: Rect::new(0, 0, columns, rows),
        };
        let probe = app.probe();
        (app, probe)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Event(event) => self.event(event),
            Msg::Input(msg) => self.forward(msg),
            Msg::HealthTick => self.probe(),
            Msg::Health(result) => {
                let service = match &result {
                    Ok(()) => ServiceStatus::Online,
                    Err(_) => ServiceStatus::Offline,
                };
                if service != self.service {
                    match result {
                        Ok(()) => tracing::info!("prediction service online"),
                        Err(err) => tracing::info!(error = %err, "prediction service offline"),
                    }
                }
                self.service = service;
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let areas = areas(frame.area());

        frame.render_widget(editor_block(), areas.editor);
        self.input.view(frame, areas.input);

        let engine = self.input.engine();
        StatusBar::editor(
            self.service,
            TextStats::of(&self.input.value()),
            engine.config(),
            engine.lifecycle(),
        )
        .render(frame, areas.status);

        let keymap = self.input.keymap();
        let help = help_line(&keymap.short_help(), &HelpStyle::default());
        frame.render_widget(Paragraph::new(help), areas.help);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            terminal_events(|event| Some(Msg::Event(event))),
            subscribe(Every::new(HEALTH_INTERVAL, "health")).map(|_| Msg::HealthTick),
        ];
        subs.extend(
            self.input
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Input)),
        );
        subs
    }
}
