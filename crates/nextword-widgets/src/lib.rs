//! Terminal widgets for the **nextword** editor.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`suggest_input`] | Text input with ghost-text suggestions and a ranked list ([`Component`](nextword_core::Component)) |
//! | [`text_edit`] | Multi-line text buffer with a char-indexed caret |
//! | [`geometry`] | Offset to terminal cell mapping for the engine |
//! | [`keymap`] | Key bindings |
//! | [`help`] | One-line key help |
//! | [`status`] | Status line with service health and text statistics |

pub mod geometry;
pub mod help;
pub mod keymap;
pub mod status;
pub mod suggest_input;
pub mod text_edit;

pub use geometry::CellGeometry;
pub use keymap::KeyMap;
pub use status::{ServiceStatus, StatusBar, TextStats};
pub use suggest_input::SuggestInput;
pub use text_edit::TextEditState;
