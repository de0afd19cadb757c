use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Model, ViewMode};

use super::{DOCUMENT_LEFT_PADDING, status, style};

/// Width available for wrapped document content.
pub fn document_content_width(total_width: u16) -> u16 {
    total_width.saturating_sub(DOCUMENT_LEFT_PADDING).max(1)
}

/// Render the complete UI for the current frame.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    match model.mode {
        ViewMode::Preview => render_preview(model, frame, area),
        ViewMode::Editor => render_editor(model, frame, area),
    }
}

/// Split off the footer rows (status bar, plus a toast bar when one is
/// showing) from the bottom of `area`.
fn footer_layout(model: &Model, area: Rect) -> (Rect, Rect, Rect) {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let content_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    (content_area, toast_area, status_area)
}

fn render_preview(model: &mut Model, frame: &mut Frame, area: Rect) {
    let (doc_outer_area, toast_area, status_area) = footer_layout(model, area);

    let visible_lines = model
        .preview
        .visible_lines(model.viewport.offset(), usize::from(model.viewport.height()));

    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let line_style = style::style_for_line_type(line.line_type());
        if let Some(spans) = line.spans() {
            let styled_spans = spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>();
            content.push(Line::from(styled_spans));
        } else {
            content.push(Line::styled(line.content().to_string(), line_style));
        }
    }

    let doc_block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    let doc = Paragraph::new(content).block(doc_block);
    // Clear first so stale cells from the previous frame do not leak through.
    frame.render_widget(Clear, doc_outer_area);
    frame.render_widget(doc, doc_outer_area);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let (editor_area, toast_area, status_area) = footer_layout(model, area);

    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);

    let visible_height = usize::from(editor_area.height);
    let start = model.editor_scroll_offset;
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = usize::from(gutter_width));

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Highlight the cell under the cursor
            let col = cursor.col.min(line_text.len());
            let before = &line_text[..col];
            let char_len = line_text[col..].chars().next().map_or(0, char::len_utf8);
            let cursor_cell = if char_len == 0 {
                " "
            } else {
                &line_text[col..col + char_len]
            };
            let after = &line_text[col + char_len..];

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_cell.to_string(),
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    let editor = Paragraph::new(content);
    frame.render_widget(Clear, editor_area);
    frame.render_widget(editor, editor_area);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

/// Calculate the gutter width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
