use crate::app::Model;
use crate::app::model::{ToastLevel, ViewMode};
use crate::buffer::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Preview navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Mode
    /// Show the raw text editor
    EnterEditMode,
    /// Return to the rendered preview
    ExitEditMode,

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // File
    /// Save the buffer to disk (handled in effects)
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the quit confirmation on any action other than the confirmed
    // quit itself. Save preserves it so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Preview navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Mode switching is a pure visibility toggle: the shared buffer is
        // untouched, so no text can be lost crossing panes in either
        // direction. Only the scroll position is carried across.
        Message::EnterEditMode => {
            if model.mode != ViewMode::Editor {
                let target = preview_line_to_source_line(&model);
                model.buffer.move_to(target, 0);
                model.editor_scroll_offset = target;
                model.mode = ViewMode::Editor;
            }
        }
        Message::ExitEditMode => {
            if model.mode == ViewMode::Editor {
                model.mode = ViewMode::Preview;
                let target = source_line_to_preview_line(&model);
                model.viewport.go_to_line(target);
            }
        }

        // Editor
        Message::EditorInsertChar(ch) => {
            model.buffer.insert_char(ch);
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorDeleteBack => {
            model.buffer.delete_back();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorDeleteForward => {
            model.buffer.delete_forward();
        }
        Message::EditorSplitLine => {
            model.buffer.split_line();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveCursor(dir) => {
            model.buffer.move_cursor(dir);
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveHome => {
            model.buffer.move_home();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveEnd => {
            model.buffer.move_end();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveWordLeft => {
            model.buffer.move_word_left();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveWordRight => {
            model.buffer.move_word_right();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveToStart => {
            model.buffer.move_to_start();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorMoveToEnd => {
            model.buffer.move_to_end();
            editor_ensure_cursor_visible(&mut model);
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model.buffer.line_count().saturating_sub(1);
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }

        // Save: handled in effects (disk write)
        // Redraw: no state change needed
        Message::Save | Message::Redraw => {}

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.reflow_preview();
            editor_ensure_cursor_visible(&mut model);
        }

        // Application
        Message::Quit => {
            if model.buffer.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    // Preview is re-rendered before the next message is handled, so it can
    // never lag the buffer by more than the edit just applied.
    model.refresh_preview();
    model
}

/// Map the preview scroll offset to a source line, proportionally.
///
/// Rendered lines and source lines do not correspond 1:1 (wrapping adds
/// lines, spacing differs), so a ratio keeps the editor roughly where the
/// reader was.
fn preview_line_to_source_line(model: &Model) -> usize {
    let vp_offset = model.viewport.offset();
    let rendered_total = model.preview.line_count();
    let source_lines = model.buffer.line_count();
    if rendered_total > 1 && vp_offset > 0 {
        (vp_offset * source_lines.saturating_sub(1)) / (rendered_total - 1)
    } else {
        0
    }
}

/// Map the editor scroll offset back to a rendered line, proportionally.
fn source_line_to_preview_line(model: &Model) -> usize {
    let src_offset = model.editor_scroll_offset;
    let src_total = model.buffer.line_count().saturating_sub(1).max(1);
    if src_offset == 0 {
        return 0;
    }
    let rendered_total = model.preview.line_count().saturating_sub(1).max(1);
    (src_offset * rendered_total) / src_total
}

/// Ensure the editor cursor line is visible in the editor pane.
fn editor_ensure_cursor_visible(model: &mut Model) {
    let cursor_line = model.buffer.cursor().line;
    let visible_height = usize::from(model.viewport.height().saturating_sub(1));
    if visible_height == 0 {
        model.editor_scroll_offset = cursor_line;
        return;
    }

    if cursor_line < model.editor_scroll_offset {
        model.editor_scroll_offset = cursor_line;
    } else if cursor_line >= model.editor_scroll_offset + visible_height {
        model.editor_scroll_offset = cursor_line + 1 - visible_height;
    }
}
