use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel, ViewMode};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.file_name().map_or_else(
        || "untitled".to_string(),
        |s| s.to_string_lossy().to_string(),
    );
    let dirty_indicator = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };

    let (status, style) = match model.mode {
        ViewMode::Preview => {
            let percent = model.viewport.scroll_percent();
            let line_info = format!(
                "Line {}/{}",
                model.viewport.offset() + 1,
                model.viewport.total_lines().max(1)
            );
            (
                format!(" VIEW  {filename}{dirty_indicator}  [{percent}%]  {line_info}  e:edit  q:quit"),
                Style::default().bg(Color::DarkGray).fg(Color::White),
            )
        }
        ViewMode::Editor => {
            let c = model.buffer.cursor();
            (
                format!(
                    " EDIT  {filename}{dirty_indicator}  Ln {}, Col {}  Esc:view  Ctrl+S:save",
                    c.line + 1,
                    c.col + 1
                ),
                Style::default().bg(Color::Magenta).fg(Color::White),
            )
        }
    };

    let status_bar = Paragraph::new(status).style(style);
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
