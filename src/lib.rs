// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal markdown editor with live preview.
//!
//! Markpad opens a markdown file in a rendered preview and lets you flip
//! into a raw text editor with a keystroke. Both panes show the same
//! buffer: every edit re-renders the preview before the next key is
//! handled, and switching panes never touches the text. Ctrl+S writes
//! the buffer back to the file.
//!
//! ## Architecture
//!
//! Markpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`buffer`]: The editable text buffer
//! - [`document`]: Markdown rendering for the preview
//! - [`persist`]: Loading and saving files
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod buffer;
pub mod document;
pub mod persist;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, ViewMode};
    pub use crate::buffer::TextBuffer;
    pub use crate::document::Document;
    pub use crate::ui::viewport::Viewport;
}
