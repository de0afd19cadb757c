//! End-to-end editing sessions driven through the update loop,
//! with real files on disk.

use std::path::PathBuf;

use tempfile::tempdir;

use markpad::app::{Message, Model, ToastLevel, ViewMode, update};
use markpad::document::LineType;
use markpad::persist::{self, LoadError};

fn open(path: PathBuf) -> Model {
    let text = persist::load(&path).unwrap();
    Model::new(path, &text, (80, 24))
}

fn type_text(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = if ch == '\n' {
            update(model, Message::EditorSplitLine)
        } else {
            update(model, Message::EditorInsertChar(ch))
        };
    }
    model
}

#[test]
fn edit_session_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Hello\n").unwrap();

    let model = open(path.clone());

    // Opens in preview with the heading rendered
    assert_eq!(model.mode, ViewMode::Preview);
    assert_eq!(
        *model.preview.line_at(0).unwrap().line_type(),
        LineType::Heading(1)
    );

    // Append a paragraph in the editor
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::EditorMoveToEnd);
    let model = type_text(model, "World\n");
    assert_eq!(model.buffer.text(), "# Hello\nWorld\n");

    // Preview already shows it before any save or mode switch
    assert!(model.preview.source().contains("World"));

    // Save and verify the exact bytes on disk
    let mut model = model;
    model.save_buffer();
    assert!(!model.buffer.is_dirty());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "# Hello\nWorld\n"
    );
}

#[test]
fn unsaved_edits_survive_mode_switches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "original\n").unwrap();

    let model = open(path.clone());
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::EditorMoveToEnd);
    let model = type_text(model, "added\n");

    // Flip back and forth; the edit stays in the buffer and preview
    let model = update(model, Message::ExitEditMode);
    assert!(model.preview.source().contains("added"));
    let model = update(model, Message::EnterEditMode);
    assert!(model.buffer.text().contains("added"));
    assert!(model.buffer.is_dirty());

    // Nothing reached the disk
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "original\n");
}

#[test]
fn save_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Doc\n\ntext\n").unwrap();

    let mut model = open(path.clone());
    model = update(model, Message::EnterEditMode);
    model = type_text(model, "x");
    model.save_buffer();
    let first = std::fs::read_to_string(&path).unwrap();
    model.save_buffer();
    let second = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn failed_save_keeps_the_buffer_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Hi\n").unwrap();
    // A regular file where the save path expects a directory makes the
    // write fail regardless of user privileges.
    std::fs::write(dir.path().join("blocker"), "").unwrap();

    let model = open(path.clone());
    let model = update(model, Message::EnterEditMode);
    let mut model = type_text(model, "unsaved");
    model.file_path = dir.path().join("blocker").join("notes.md");
    let text_before = model.buffer.text();

    model.save_buffer();

    // Buffer and dirty flag untouched, error surfaced, file unchanged
    assert!(model.buffer.is_dirty());
    assert_eq!(model.buffer.text(), text_before);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Save failed"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hi\n");
}

#[test]
fn quit_guard_blocks_until_saved_or_confirmed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Hi\n").unwrap();

    let model = open(path.clone());
    let model = update(model, Message::EnterEditMode);
    let model = type_text(model, "x");

    let model = update(model, Message::Quit);
    assert!(!model.should_quit);

    // Saving while the quit is pending finishes the quit
    let mut model = update(model, Message::Save);
    model.save_buffer();
    assert!(model.should_quit);
    assert!(std::fs::read_to_string(&path).unwrap().starts_with('x'));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let err = persist::load(&dir.path().join("absent.md")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn load_reports_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.md");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();
    let err = persist::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::InvalidUtf8 { .. }));
}

#[test]
fn crlf_backspace_join_saves_clean_line_endings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dos.md");
    std::fs::write(&path, "alpha\r\nbeta\r\n").unwrap();

    let model = open(path.clone());
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::EditorMoveCursor(markpad::buffer::Direction::Down));
    let mut model = update(model, Message::EditorDeleteBack);

    model.save_buffer();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "alphabeta\r\n"
    );
}

#[test]
fn crlf_content_roundtrips_byte_for_byte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dos.md");
    let content = "# Title\r\n\r\nline one\r\nline two\r\n";
    std::fs::write(&path, content).unwrap();

    let mut model = open(path.clone());
    model.save_buffer();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}
