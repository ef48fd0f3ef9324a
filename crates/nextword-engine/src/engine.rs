//! The suggestion lifecycle engine bound to one text input.
//!
//! The host sends every input-affecting event as a [`Message`] carrying the
//! live [`TextBufferState`], runs the returned [`Command`], and reads
//! [`SuggestionEngine::snapshot`] to render. Accepting a suggestion leaves a
//! [`Commit`] behind; the host takes it with [`SuggestionEngine::take_commit`]
//! in the same update, writes it into its input and reports the new buffer
//! with [`Message::Input`]. Nothing else may reach the input in between, or
//! the commit would overwrite it.

use crate::acceptance::{self, Commit};
use crate::buffer::TextBufferState;
use crate::collaborator::{PredictError, Predictor};
use crate::config::EngineConfig;
use crate::coordinator::{RequestCoordinator, RequestId, Resolution, StaleReason};
use crate::state::{Lifecycle, SuggestionState};
use crate::suggestion::Suggestion;
use crate::trigger;
use nextword_core::Command;
use std::sync::Arc;

/// Engine messages, both host-facing and internal.
#[derive(Debug, Clone)]
pub enum Message {
    /// The content changed.
    Input(TextBufferState),
    /// The caret moved without an edit (click, arrow keys).
    CaretMoved(TextBufferState),
    /// A suggestion key was pressed. Check [`SuggestionEngine::handles`]
    /// first so the key is not also applied to the text.
    Key(SuggestKey),
    /// An entry of the ranked list was clicked.
    Pick(usize),
    /// The input lost focus.
    Blur,
    /// Hide suggestions on request of the host.
    Hide,
    /// Replace the configuration.
    Configure(EngineConfig),
    /// The debounce timer of a request fired.
    DebounceElapsed(RequestId),
    /// A prediction request finished.
    PredictionsReady(RequestId, Result<Vec<Suggestion>, PredictError>),
}

/// Keys the engine can consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestKey {
    /// Tab: accept the top suggestion.
    Accept,
    /// Down: open the list, or highlight the next entry.
    Next,
    /// Up: highlight the previous entry.
    Previous,
    /// Enter: commit the highlighted entry.
    Commit,
    /// Right: commit the highlighted entry.
    CommitRight,
    /// Escape: close the list, keeping the ghost text.
    Dismiss,
}

/// What the host needs to render, taken after each update.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// Current lifecycle.
    pub lifecycle: Lifecycle,
    /// Ranked suggestions (empty unless inline or browsing).
    pub suggestions: Vec<Suggestion>,
    /// Highlighted entry, while browsing.
    pub selected_index: Option<usize>,
    /// The request allowed to complete, if any.
    pub pending_request_id: Option<RequestId>,
}

/// Suggestions fetched for a buffer, kept while the caret wanders off so
/// returning to the same spot shows them again without a new request.
#[derive(Debug, Clone)]
struct Held {
    anchor: TextBufferState,
    suggestions: Vec<Suggestion>,
}

/// Drives trigger validation, debounced requests, the lifecycle and
/// acceptance for one input.
pub struct SuggestionEngine {
    config: EngineConfig,
    predictor: Arc<dyn Predictor>,
    coordinator: RequestCoordinator,
    state: SuggestionState,
    live: TextBufferState,
    held: Option<Held>,
    commit: Option<Commit>,
}

impl SuggestionEngine {
    /// Create an engine with default configuration.
    pub fn new(predictor: impl Predictor) -> Self {
        Self::with_config(predictor, EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(predictor: impl Predictor, config: EngineConfig) -> Self {
        Self {
            coordinator: RequestCoordinator::new(config.debounce()),
            config,
            predictor: Arc::new(predictor),
            state: SuggestionState::new(),
            live: TextBufferState::default(),
            held: None,
            commit: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle.
    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle()
    }

    /// The lifecycle state and suggestions.
    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    /// The last buffer reported by the host.
    pub fn buffer(&self) -> &TextBufferState {
        &self.live
    }

    /// Everything the host renders from.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            lifecycle: self.state.lifecycle(),
            suggestions: self.state.suggestions().to_vec(),
            selected_index: self.state.selected_index(),
            pending_request_id: self.coordinator.pending_id(),
        }
    }

    /// The write produced by the last acceptance, if the host has not taken
    /// it yet. Check after every [`update`](Self::update) that may accept
    /// (keys and [`Message::Pick`]).
    pub fn take_commit(&mut self) -> Option<Commit> {
        self.commit.take()
    }

    /// Whether `key` is consumed in the current state.
    pub fn handles(&self, key: SuggestKey) -> bool {
        match key {
            SuggestKey::Accept | SuggestKey::Next => self.state.is_showing(),
            SuggestKey::Previous
            | SuggestKey::Commit
            | SuggestKey::CommitRight
            | SuggestKey::Dismiss => self.state.lifecycle() == Lifecycle::Browsing,
        }
    }

    /// Process a message.
    pub fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Input(buffer) => {
                self.live = buffer;
                self.held = None;
                self.trigger()
            }
            Message::CaretMoved(buffer) => {
                self.live = buffer;
                self.caret_moved()
            }
            Message::Key(key) => self.key(key),
            Message::Pick(index) => {
                if self.state.lifecycle() == Lifecycle::Browsing {
                    self.accept(index)
                } else {
                    Command::none()
                }
            }
            Message::Blur | Message::Hide => {
                self.held = None;
                self.go_idle("hidden");
                Command::none()
            }
            Message::Configure(config) => {
                self.coordinator.set_delay(config.debounce());
                if !config.auto_suggest {
                    self.held = None;
                    self.go_idle("auto-suggest disabled");
                }
                self.config = config;
                Command::none()
            }
            Message::DebounceElapsed(id) => self.dispatch(id),
            Message::PredictionsReady(id, result) => {
                self.resolve(id, result);
                Command::none()
            }
        }
    }

    fn trigger(&mut self) -> Command<Message> {
        if !self.config.auto_suggest {
            return Command::none();
        }
        let Some(id) = self.coordinator.schedule(&self.live) else {
            self.go_idle("not a trigger position");
            return Command::none();
        };
        self.state.begin_request();
        tracing::debug!(request = %id, delay = ?self.coordinator.delay(), "pending");
        Command::tick(self.coordinator.delay(), move |_| {
            Message::DebounceElapsed(id)
        })
    }

    fn caret_moved(&mut self) -> Command<Message> {
        if !self.config.auto_suggest {
            return Command::none();
        }
        if !trigger::is_eligible(&self.live) {
            self.go_idle("caret left trigger position");
            return Command::none();
        }
        if self.state.anchor() == Some(&self.live) {
            return Command::none();
        }
        if self.state.lifecycle() == Lifecycle::Pending {
            return Command::none();
        }
        match self.held.take() {
            Some(held) if held.anchor == self.live => {
                self.state.begin_request();
                self.state
                    .apply_suggestions(held.suggestions.clone(), held.anchor.clone());
                self.held = Some(held);
                tracing::debug!("re-showing held suggestions");
                Command::none()
            }
            _ => self.trigger(),
        }
    }

    fn dispatch(&mut self, id: RequestId) -> Command<Message> {
        let Some(query) = self.coordinator.dispatch(id) else {
            tracing::trace!(request = %id, "debounce superseded");
            return Command::none();
        };
        tracing::debug!(request = %id, query = %query, "requesting predictions");
        let request = self.predictor.predict(query);
        Command::perform(request, move |result| Message::PredictionsReady(id, result))
    }

    fn resolve(&mut self, id: RequestId, result: Result<Vec<Suggestion>, PredictError>) {
        match self.coordinator.resolve(id, &self.live) {
            Resolution::Current(key) => match result {
                Ok(suggestions) => {
                    let count = suggestions.len();
                    self.state.apply_suggestions(suggestions, self.live.clone());
                    if let Some(anchor) = self.state.anchor().cloned() {
                        self.held = Some(Held {
                            anchor,
                            suggestions: self.state.suggestions().to_vec(),
                        });
                    }
                    tracing::debug!(
                        request = %id,
                        word = %key.word,
                        count,
                        lifecycle = %self.state.lifecycle(),
                        "predictions applied"
                    );
                }
                Err(err) => {
                    tracing::warn!(request = %id, error = %err, "prediction failed");
                    self.go_idle("prediction failed");
                }
            },
            Resolution::Stale(StaleReason::Superseded) => {
                tracing::trace!(request = %id, "stale response dropped");
            }
            Resolution::Stale(StaleReason::Ineligible) => {
                tracing::trace!(request = %id, "response for abandoned trigger dropped");
                self.go_idle("caret left trigger position");
            }
        }
    }

    fn key(&mut self, key: SuggestKey) -> Command<Message> {
        if !self.handles(key) {
            return Command::none();
        }
        match key {
            SuggestKey::Accept => self.accept(0),
            SuggestKey::Next => {
                if self.state.lifecycle() == Lifecycle::Inline {
                    self.state.open_browsing();
                    tracing::debug!("browsing");
                } else {
                    self.state.select_next();
                }
                Command::none()
            }
            SuggestKey::Previous => {
                self.state.select_previous();
                Command::none()
            }
            SuggestKey::Commit | SuggestKey::CommitRight => match self.state.active_index() {
                Some(index) => self.accept(index),
                None => Command::none(),
            },
            SuggestKey::Dismiss => {
                self.state.close_browsing();
                tracing::debug!("list closed");
                Command::none()
            }
        }
    }

    fn accept(&mut self, index: usize) -> Command<Message> {
        let Some(suggestion) = self.state.take(index) else {
            return Command::none();
        };
        self.coordinator.cancel();
        self.held = None;
        let commit = acceptance::commit(&self.live, &suggestion, self.config.smart_space);
        tracing::debug!(word = suggestion.word(), caret = commit.caret, "accepted");
        self.live = commit.to_buffer();
        self.commit = Some(commit);
        Command::none()
    }

    fn go_idle(&mut self, reason: &'static str) {
        let from = self.state.lifecycle();
        self.coordinator.cancel();
        self.state.reset();
        if from != Lifecycle::Idle {
            tracing::debug!(%from, reason, "idle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use nextword_core::testing::Effects;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Answers from a fixed table and records every query it receives.
    #[derive(Default)]
    struct Scripted {
        answers: HashMap<String, Result<Vec<Suggestion>, PredictError>>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl Scripted {
        fn answer(mut self, query: &str, words: &[(&str, f32)]) -> Self {
            let list = words
                .iter()
                .filter_map(|(w, p)| Suggestion::new(*w, *p))
                .collect();
            self.answers.insert(query.to_owned(), Ok(list));
            self
        }

        fn fail(mut self, query: &str, err: PredictError) -> Self {
            self.answers.insert(query.to_owned(), Err(err));
            self
        }
    }

    impl Predictor for Scripted {
        fn predict(&self, text: String) -> BoxFuture<'static, Result<Vec<Suggestion>, PredictError>> {
            self.queries.lock().unwrap().push(text.clone());
            let answer = self.answers.get(&text).cloned().unwrap_or(Ok(vec![]));
            async move { answer }.boxed()
        }
    }

    struct Harness {
        engine: SuggestionEngine,
        effects: Effects<Message>,
        commits: Vec<Commit>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl Harness {
        fn new(predictor: Scripted) -> Self {
            Self::with_config(predictor, EngineConfig::default())
        }

        fn with_config(predictor: Scripted, config: EngineConfig) -> Self {
            let queries = predictor.queries.clone();
            let config = config.with_debounce(Duration::ZERO);
            Self {
                engine: SuggestionEngine::with_config(predictor, config),
                effects: Effects::default(),
                commits: vec![],
                queries,
            }
        }

        fn send(&mut self, msg: Message) {
            let cmd = self.engine.update(msg);
            self.commits.extend(self.engine.take_commit());
            self.effects.push(cmd);
            for msg in self.effects.take_messages() {
                self.send(msg);
            }
        }

        fn type_text(&mut self, text: &str) {
            self.send(Message::Input(TextBufferState::at_end(text)));
        }

        fn key(&mut self, key: SuggestKey) {
            self.send(Message::Key(key));
        }

        /// Resolve the oldest timer or request.
        async fn step(&mut self) -> bool {
            match self.effects.resolve_next().await {
                Some(msg) => {
                    self.send(msg);
                    true
                }
                None => false,
            }
        }

        async fn settle(&mut self) {
            while self.step().await {}
        }

        fn words(&self) -> Vec<String> {
            self.engine
                .state()
                .suggestions()
                .iter()
                .map(|s| s.word().to_owned())
                .collect()
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    fn xin_chao() -> Scripted {
        Scripted::default().answer("xin chao", &[("ban", 0.7), ("the", 0.2)])
    }

    #[tokio::test]
    async fn trigger_goes_pending_then_inline() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        assert_eq!(h.engine.lifecycle(), Lifecycle::Pending);
        assert!(h.engine.snapshot().pending_request_id.is_some());

        h.settle().await;
        let snap = h.engine.snapshot();
        assert_eq!(snap.lifecycle, Lifecycle::Inline);
        assert_eq!(snap.suggestions[0].word(), "ban");
        assert_eq!(snap.selected_index, None);
        assert_eq!(snap.pending_request_id, None);
    }

    #[tokio::test]
    async fn tab_accepts_top_with_smart_space() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;

        assert!(h.engine.handles(SuggestKey::Accept));
        h.key(SuggestKey::Accept);
        assert_eq!(
            h.commits,
            vec![Commit {
                content: "xin chao ban ".into(),
                caret: 13,
            }]
        );
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
        assert!(h.engine.state().suggestions().is_empty());
    }

    #[tokio::test]
    async fn accept_without_smart_space() {
        let config = EngineConfig::default().with_smart_space(false);
        let mut h = Harness::with_config(xin_chao(), config);
        h.type_text("xin chao ");
        h.settle().await;
        h.key(SuggestKey::Accept);
        assert_eq!(h.commits[0].content, "xin chao ban");
        assert_eq!(h.commits[0].caret, 12);
    }

    #[tokio::test]
    async fn browse_down_down_enter_commits_second() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;

        h.key(SuggestKey::Next);
        assert_eq!(h.engine.lifecycle(), Lifecycle::Browsing);
        assert_eq!(h.engine.snapshot().selected_index, Some(0));
        h.key(SuggestKey::Next);
        assert_eq!(h.engine.snapshot().selected_index, Some(1));
        h.key(SuggestKey::Commit);

        assert_eq!(h.commits[0].content, "xin chao the ");
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
    }

    #[tokio::test]
    async fn up_wraps_and_right_commits() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;
        h.key(SuggestKey::Next);
        h.key(SuggestKey::Previous);
        assert_eq!(h.engine.snapshot().selected_index, Some(1));
        h.key(SuggestKey::CommitRight);
        assert_eq!(h.commits[0].content, "xin chao the ");
    }

    #[tokio::test]
    async fn escape_closes_list_but_keeps_ghost() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;
        h.key(SuggestKey::Next);
        h.key(SuggestKey::Next);

        h.key(SuggestKey::Dismiss);
        assert_eq!(h.engine.lifecycle(), Lifecycle::Inline);
        assert_eq!(h.words(), vec!["ban", "the"]);
        assert_eq!(h.engine.snapshot().selected_index, None);
    }

    #[tokio::test]
    async fn keys_pass_through_when_nothing_is_shown() {
        let mut h = Harness::new(xin_chao());
        assert!(!h.engine.handles(SuggestKey::Accept));
        assert!(!h.engine.handles(SuggestKey::Next));
        h.type_text("xin chao ");
        h.settle().await;
        assert!(h.engine.handles(SuggestKey::Next));
        assert!(!h.engine.handles(SuggestKey::Commit));
        assert!(!h.engine.handles(SuggestKey::Previous));
        assert!(!h.engine.handles(SuggestKey::Dismiss));

        h.key(SuggestKey::Commit);
        assert!(h.commits.is_empty());
    }

    #[tokio::test]
    async fn burst_of_triggers_sends_one_request_for_the_last() {
        let predictor = xin_chao().answer("xin chao ban", &[("oi", 0.9)]);
        let mut h = Harness::new(predictor);
        h.type_text("xin ");
        h.type_text("xin chao ");
        h.type_text("xin chao ban ");
        h.settle().await;

        assert_eq!(h.queries(), vec!["xin chao ban"]);
        assert_eq!(h.words(), vec!["oi"]);
    }

    #[tokio::test]
    async fn older_response_is_ignored_once_a_newer_request_is_pending() {
        let predictor = xin_chao().answer("xin chao ban", &[("oi", 0.9)]);
        let mut h = Harness::new(predictor);
        h.type_text("xin chao ");
        // Timer fires, first request goes out.
        assert!(h.step().await);
        h.type_text("xin chao ban ");
        let newer = h.engine.snapshot().pending_request_id;

        // First response arrives while the second trigger is pending.
        assert!(h.step().await);
        assert_eq!(h.engine.lifecycle(), Lifecycle::Pending);
        assert_eq!(h.engine.snapshot().pending_request_id, newer);
        assert!(h.words().is_empty());

        h.settle().await;
        assert_eq!(h.words(), vec!["oi"]);
    }

    #[tokio::test]
    async fn typing_during_flight_discards_the_response() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        assert!(h.step().await);
        assert_eq!(h.queries(), vec!["xin chao"]);

        h.type_text("xin chao b");
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);

        h.settle().await;
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
        assert!(h.words().is_empty());
    }

    #[tokio::test]
    async fn errors_and_empty_lists_degrade_to_idle() {
        let predictor = Scripted::default()
            .fail("oops", PredictError::Status(500))
            .answer("nothing", &[]);
        let mut h = Harness::new(predictor);

        h.type_text("oops ");
        h.settle().await;
        assert_eq!(h.engine.snapshot().lifecycle, Lifecycle::Idle);
        assert_eq!(h.engine.snapshot().pending_request_id, None);

        h.type_text("nothing ");
        h.settle().await;
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
        assert!(h.words().is_empty());
    }

    #[tokio::test]
    async fn ineligible_input_never_requests() {
        let mut h = Harness::new(xin_chao());
        for text in ["xin chao", "xin chao  ", "123 ", ""] {
            h.type_text(text);
        }
        h.send(Message::Input(TextBufferState::new("xin chao ", 3)));
        h.settle().await;
        assert!(h.queries().is_empty());
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
    }

    #[tokio::test]
    async fn caret_round_trip_reshows_without_new_request() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;

        h.send(Message::CaretMoved(TextBufferState::new("xin chao ", 2)));
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);

        h.send(Message::CaretMoved(TextBufferState::at_end("xin chao ")));
        assert_eq!(h.engine.lifecycle(), Lifecycle::Inline);
        assert_eq!(h.words(), vec!["ban", "the"]);
        h.settle().await;
        assert_eq!(h.queries().len(), 1);
    }

    #[tokio::test]
    async fn caret_move_to_fresh_trigger_requests() {
        let mut h = Harness::new(xin_chao());
        h.send(Message::CaretMoved(TextBufferState::at_end("xin chao ")));
        assert_eq!(h.engine.lifecycle(), Lifecycle::Pending);
        h.settle().await;
        assert_eq!(h.words(), vec!["ban", "the"]);
    }

    #[tokio::test]
    async fn click_on_entry_commits_it() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;

        // Only entries of an open list can be clicked.
        h.send(Message::Pick(1));
        assert!(h.commits.is_empty());

        h.key(SuggestKey::Next);
        h.send(Message::Pick(1));
        assert_eq!(h.commits[0].content, "xin chao the ");
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
    }

    #[tokio::test]
    async fn blur_resets_and_cancels() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.send(Message::Blur);
        assert_eq!(h.engine.snapshot().pending_request_id, None);
        h.settle().await;
        assert!(h.queries().is_empty());
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
    }

    #[tokio::test]
    async fn disabling_auto_suggest_hides_and_stops_requests() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;

        let off = h.engine.config().clone().with_auto_suggest(false);
        h.send(Message::Configure(off));
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
        assert!(!h.engine.handles(SuggestKey::Accept));

        h.type_text("xin chao ");
        h.settle().await;
        assert_eq!(h.queries().len(), 1);
        assert_eq!(h.engine.lifecycle(), Lifecycle::Idle);
    }

    #[tokio::test]
    async fn accepted_text_becomes_the_next_trigger() {
        let predictor = xin_chao().answer("xin chao ban", &[("oi", 0.9)]);
        let mut h = Harness::new(predictor);
        h.type_text("xin chao ");
        h.settle().await;
        h.key(SuggestKey::Accept);

        let next = h.commits[0].to_buffer();
        h.send(Message::Input(next));
        h.settle().await;
        assert_eq!(h.words(), vec!["oi"]);
    }

    #[tokio::test]
    async fn commit_is_taken_once() {
        let mut h = Harness::new(xin_chao());
        h.type_text("xin chao ");
        h.settle().await;
        assert_eq!(h.engine.take_commit(), None);

        // Bypass the harness so the commit stays in the engine.
        let _ = h.engine.update(Message::Key(SuggestKey::Accept));
        assert_eq!(h.engine.buffer().content(), "xin chao ban ");
        assert!(h.engine.take_commit().is_some());
        assert_eq!(h.engine.take_commit(), None);
    }

    /// Runs each command's future on its own task and forwards the result,
    /// the way the program runtime does.
    fn spawn(cmd: Command<Message>, tx: &mpsc::UnboundedSender<Message>) {
        let mut effects = Effects::from_command(cmd);
        let tx = tx.clone();
        tokio::spawn(async move {
            while let Some(msg) = effects.resolve_next().await {
                let _ = tx.send(msg);
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn burst_inside_real_delay_sends_one_request() {
        let predictor = xin_chao();
        let queries = predictor.queries.clone();
        let mut engine = SuggestionEngine::new(predictor);
        assert_eq!(engine.config().debounce(), Duration::from_millis(300));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();

        for text in ["xin ", "xin chao ", "xin chao "] {
            spawn(engine.update(Message::Input(TextBufferState::at_end(text))), &tx);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        // 200 ms after the last trigger: its timer has not fired yet.
        tokio::time::sleep(Duration::from_millis(100)).await;
        while let Ok(msg) = rx.try_recv() {
            spawn(engine.update(msg), &tx);
        }
        assert!(queries.lock().unwrap().is_empty());
        assert_eq!(engine.lifecycle(), Lifecycle::Pending);

        while engine.lifecycle() != Lifecycle::Inline {
            let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("engine stalled")
                .expect("channel open");
            spawn(engine.update(msg), &tx);
        }
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(*queries.lock().unwrap(), vec!["xin chao".to_owned()]);
    }
}
