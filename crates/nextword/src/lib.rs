//! **nextword**: a terminal text editor that suggests the next word.
//!
//! Type a word and a space, and after a short pause the most likely next word
//! appears as dim ghost text at the caret. `Tab` takes it, `↓` opens the full
//! ranked list, `Esc` closes it. Suggestions come from an HTTP prediction
//! service; when it is down the editor keeps working without them.
//!
//! The crates it is built from are re-exported here:
//!
//! * [`nextword_core`] items at the crate root ([`Model`], [`Command`],
//!   [`Subscription`], [`run_with`], ...).
//! * [`engine`]: the suggestion lifecycle, independent of any terminal.
//! * [`predict`]: HTTP predictor and health probe.
//! * [`widgets`]: the suggest input, status line and key help.
//!
//! The binary is [`app::EditorApp`] configured through [`cli::Cli`] and
//! [`config::AppConfig`].

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use nextword_core::*;

pub mod engine {
    pub use nextword_engine::*;
}

pub mod predict {
    pub use nextword_predict::*;
}

pub mod widgets {
    pub use nextword_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
