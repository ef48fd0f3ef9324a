//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- keyboard, mouse, resize,
//!   focus, and paste events from the terminal.
//! - **Timers** ([`Every`]) -- repeating ticks, used for periodic health
//!   probes of the prediction service.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
