//! The suggestion lifecycle engine.
//!
//! Decides when a next-word request is legitimate, debounces requests and
//! races them against a moving caret, keeps the inline/browsing state of the
//! ranked suggestions, and merges an accepted word back into the text.
//!
//! | Piece | Module |
//! |-------|--------|
//! | Trigger eligibility | [`trigger`] |
//! | Debounce and staleness | [`coordinator`] |
//! | `Idle -> Pending -> Inline <-> Browsing` | [`state`] |
//! | Cyclic list navigation | [`navigation`] |
//! | Acceptance | [`acceptance`] |
//! | Overlay placement | [`position`] |
//! | Everything wired to messages | [`engine`] |
//!
//! The engine performs no I/O of its own. Prediction goes through a
//! [`Predictor`], measurement through a [`Geometry`], and waiting is returned
//! to the runtime as a [`nextword_core::Command`].
//!
//! ```rust,ignore
//! let mut engine = SuggestionEngine::new(predictor);
//! let cmd = engine.update(Message::Input(TextBufferState::at_end("xin chao ")));
//! // run `cmd`, feed its messages back, then render from `engine.snapshot()`
//! ```

pub mod acceptance;
pub mod buffer;
pub mod collaborator;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod navigation;
pub mod position;
pub mod state;
pub mod suggestion;
pub mod trigger;

pub use acceptance::Commit;
pub use buffer::TextBufferState;
pub use collaborator::{HealthProbe, PredictError, Predictor};
pub use config::EngineConfig;
pub use coordinator::RequestId;
pub use engine::{EngineSnapshot, Message, SuggestKey, SuggestionEngine};
pub use position::{Geometry, PositionAdapter};
pub use state::Lifecycle;
pub use suggestion::Suggestion;
