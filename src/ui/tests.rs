use super::*;
use crate::app::{Model, ToastLevel, ViewMode};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn test_model(text: &str) -> Model {
    Model::new(PathBuf::from("test.md"), text, (80, 24))
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_preview_renders_heading_text() {
    let mut model = test_model("# Title\n\nSome body text.\n");

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("# Title"));
    assert!(content.contains("Some body text."));
}

#[test]
fn test_preview_status_bar_shows_filename_and_mode() {
    let mut model = test_model("hello\n");

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("VIEW"));
    assert!(content.contains("test.md"));
    assert!(!content.contains("[modified]"));
}

#[test]
fn test_editor_renders_raw_markup_with_gutter() {
    let mut model = test_model("# Title\n\n**bold**\n");
    model.mode = ViewMode::Editor;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    // Raw markup, not the rendered form
    assert!(content.contains("**bold**"));
    assert!(content.contains("1 # Title"));
    assert!(content.contains("EDIT"));
}

#[test]
fn test_editor_status_shows_dirty_indicator() {
    let mut model = test_model("hello\n");
    model.mode = ViewMode::Editor;
    model.buffer.insert_char('x');

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("[modified]"));
}

#[test]
fn test_toast_bar_is_rendered_when_active() {
    let mut model = test_model("hello\n");
    model.show_toast(ToastLevel::Error, "save failed: permission denied");

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("[error] save failed: permission denied"));
}

#[test]
fn test_empty_document_renders_without_panic() {
    let mut model = test_model("");

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("VIEW"));
}

#[test]
fn test_line_number_width_grows_with_file() {
    assert_eq!(line_number_width(5), 1);
    assert_eq!(line_number_width(42), 2);
    assert_eq!(line_number_width(999), 3);
    assert_eq!(line_number_width(250_000), 6);
}

#[test]
fn test_document_content_width_reserves_padding() {
    assert_eq!(document_content_width(80), 80 - DOCUMENT_LEFT_PADDING);
    assert_eq!(document_content_width(1), 1);
}
