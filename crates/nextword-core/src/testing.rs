//! Headless drivers for exercising models and components in tests.

use crate::command::{Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::collections::VecDeque;

/// The side effects described by one or more [`Command`]s, unpacked so a test
/// can decide when each one happens.
///
/// Immediate messages are queued in order. Futures (timers, prediction
/// requests) are kept unresolved until [`resolve_next`](Effects::resolve_next)
/// awaits the oldest one, which lets a test interleave "the response arrives"
/// with "the user keeps typing" deterministically.
pub struct Effects<Msg: Send + 'static> {
    messages: VecDeque<Msg>,
    futures: VecDeque<BoxFuture<'static, Msg>>,
    quit: bool,
}

impl<Msg: Send + 'static> Default for Effects<Msg> {
    fn default() -> Self {
        Self {
            messages: VecDeque::new(),
            futures: VecDeque::new(),
            quit: false,
        }
    }
}

impl<Msg: Send + 'static> Effects<Msg> {
    /// Unpack a single command.
    pub fn from_command(cmd: Command<Msg>) -> Self {
        let mut effects = Self::default();
        effects.push(cmd);
        effects
    }

    /// Add the effects of another command.
    pub fn push(&mut self, cmd: Command<Msg>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.messages.push_back(msg),
            CommandInner::Quit => self.quit = true,
            CommandInner::Future(fut) => self.futures.push_back(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.push(cmd);
                }
            }
        }
    }

    /// Take the queued immediate messages, oldest first.
    pub fn take_messages(&mut self) -> Vec<Msg> {
        self.messages.drain(..).collect()
    }

    /// Number of futures not yet resolved.
    pub fn pending_futures(&self) -> usize {
        self.futures.len()
    }

    /// Whether any command asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Await the oldest pending future and return its message.
    pub async fn resolve_next(&mut self) -> Option<Msg> {
        let fut = self.futures.pop_front()?;
        Some(fut.await)
    }

    /// Drop every pending future without running it.
    pub fn discard_futures(&mut self) {
        self.futures.clear();
    }
}

/// A headless harness that drives a [`Model`] without a real terminal.
///
/// Synchronous messages produced by `update` are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Async work is held until
/// [`settle`](TestProgram::settle) runs it, so a plain `#[test]` can inspect
/// the state between a request being issued and its response arriving.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<EditorApp>::new(flags);
/// prog.send(Msg::Key(key(KeyCode::Char('a'))));
/// prog.drain_messages();
/// assert!(prog.render_string(40, 5).contains("a"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    effects: Effects<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        Self {
            model,
            effects: Effects::from_command(init_cmd),
        }
    }

    /// Send a message, triggering a single update.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.effects.push(cmd);
    }

    /// Process queued immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        loop {
            let messages = self.effects.take_messages();
            if messages.is_empty() {
                break;
            }
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Run all pending async work (and whatever it causes) to completion.
    pub async fn settle(&mut self) {
        loop {
            self.drain_messages();
            match self.effects.resolve_next().await {
                Some(msg) => self.send(msg),
                None => break,
            }
        }
    }

    /// Number of unresolved futures.
    pub fn pending_futures(&self) -> usize {
        self.effects.pending_futures()
    }

    /// Drop pending futures, as if their results never came back.
    pub fn discard_futures(&mut self) {
        self.effects.discard_futures();
    }

    /// Whether the model asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.effects.quit_requested()
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend is infallible");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend is infallible");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

/// Flatten a rendered buffer into text, rows separated by newlines.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
