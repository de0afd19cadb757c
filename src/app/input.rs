use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model, ViewMode};
use crate::buffer::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Resize(w, h) => {
                tracing::trace!("resize queued: {w}x{h}");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        // Keys that behave the same in both panes
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Save);
            }
            KeyCode::Char('c' | 'q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Quit);
            }
            _ => {}
        }

        match model.mode {
            ViewMode::Preview => Self::handle_preview_key(key),
            ViewMode::Editor => Self::handle_editor_key(key, model),
        }
    }

    fn handle_preview_key(key: event::KeyEvent) -> Option<Message> {
        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Mode
            KeyCode::Char('e' | 'i') | KeyCode::Enter => Some(Message::EnterEditMode),

            // Quit
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),

            _ => None,
        }
    }

    fn handle_editor_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        let page = usize::from(model.viewport.height());
        match key.code {
            KeyCode::Esc => Some(Message::ExitEditMode),

            // Cursor movement
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveWordLeft)
            }
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveWordRight)
            }
            KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveToStart)
            }
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveToEnd)
            }
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorScrollUp(page)),
            KeyCode::PageDown => Some(Message::EditorScrollDown(page)),

            // Editing
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Tab => Some(Message::EditorInsertChar('\t')),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::EditorInsertChar(c))
            }

            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
