//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field occupies, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

/// Draw a form field with its inline error under the value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = match (is_active, error.is_some()) {
        (_, true) => Style::default().fg(Color::Red),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    // Placeholders show only on the focused field; selects always show theirs
    let is_placeholder = field.as_text().is_empty();
    let display_value = if is_placeholder && !is_active && !field.is_select() {
        String::new()
    } else {
        field.display_value()
    };
    let value_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        value_style
    };

    let cursor = if is_active && !field.is_select() {
        "▌"
    } else {
        ""
    };

    let mut lines: Vec<Line> = display_value
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let marker = if field.is_required() { " *" } else { "" };
    let mut block = Block::default()
        .title(format!(" {}{} ", field.label(), marker))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Draw a help text line at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
