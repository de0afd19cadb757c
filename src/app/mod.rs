//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel, ViewMode};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    text: String,
    start_in_editor: bool,
}

impl App {
    /// Create a new application for a file and its already-loaded content.
    ///
    /// Taking the text up front means the file is read exactly once, by
    /// the caller, before any terminal state exists.
    pub const fn new(file_path: PathBuf, text: String) -> Self {
        Self {
            file_path,
            text,
            start_in_editor: false,
        }
    }

    /// Start in the raw text editor instead of the rendered preview.
    #[must_use]
    pub const fn with_editor_mode(mut self, enabled: bool) -> Self {
        self.start_in_editor = enabled;
        self
    }
}
