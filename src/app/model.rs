use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::buffer::TextBuffer;
use crate::document::Document;
use crate::persist;
use crate::ui::viewport::Viewport;

/// Which pane is visible.
///
/// Both panes show the same underlying buffer; switching never touches
/// the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Rendered markdown preview (read-only).
    #[default]
    Preview,
    /// Raw text editor.
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The raw text being edited
    pub buffer: TextBuffer,
    /// Rendered preview of the buffer, always derived from it
    pub preview: Document,
    /// Which pane is visible
    pub mode: ViewMode,
    /// Viewport managing preview scroll position
    pub viewport: Viewport,
    /// Path to the source file
    pub file_path: PathBuf,
    /// First visible line in the editor pane
    pub editor_scroll_offset: usize,
    /// Buffer revision the preview was last rendered from
    rendered_revision: u64,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("mode", &self.mode)
            .field("rendered_revision", &self.rendered_revision)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model from loaded file text.
    pub fn new(file_path: PathBuf, text: &str, terminal_size: (u16, u16)) -> Self {
        let buffer = TextBuffer::from_text(text);
        let width = crate::ui::document_content_width(terminal_size.0);
        let preview = Document::render_with_layout(text, width);
        let total_lines = preview.line_count();

        Self {
            rendered_revision: buffer.revision(),
            buffer,
            preview,
            mode: ViewMode::Preview,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_lines,
            ),
            file_path,
            editor_scroll_offset: 0,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }

    /// Revision of the buffer the preview currently reflects.
    pub const fn rendered_revision(&self) -> u64 {
        self.rendered_revision
    }

    pub(super) fn layout_width(&self) -> u16 {
        crate::ui::document_content_width(self.viewport.width())
    }

    /// Re-render the preview if the buffer has changed since the last render.
    ///
    /// Called at the end of every update so the preview is never stale,
    /// regardless of which pane is showing.
    pub fn refresh_preview(&mut self) {
        if self.buffer.revision() != self.rendered_revision {
            self.reflow_preview();
        }
    }

    /// Unconditionally re-render the preview at the current layout width.
    pub fn reflow_preview(&mut self) {
        let text = self.buffer.text();
        self.preview = Document::render_with_layout(&text, self.layout_width());
        self.viewport.set_total_lines(self.preview.line_count());
        self.rendered_revision = self.buffer.revision();
    }

    /// Write the buffer contents to disk.
    ///
    /// On success the buffer is marked clean and a pending quit completes.
    /// On failure the buffer keeps its content and dirty state so nothing
    /// typed is lost.
    pub fn save_buffer(&mut self) {
        let snapshot = self.buffer.text();
        match persist::save(&self.file_path, &snapshot) {
            Ok(()) => {
                self.buffer.mark_clean();
                tracing::debug!("saved {} ({} bytes)", self.file_path.display(), snapshot.len());
                self.show_toast(ToastLevel::Info, format!("Saved {}", self.file_path.display()));
                if self.quit_confirmed {
                    self.should_quit = true;
                }
            }
            Err(err) => {
                tracing::error!("save failed: {err}");
                self.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: TextBuffer::empty(),
            preview: Document::empty(),
            mode: ViewMode::Preview,
            viewport: Viewport::new(80, 24, 0),
            file_path: PathBuf::new(),
            editor_scroll_offset: 0,
            rendered_revision: 0,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }
}
