//! Inquiry form rendering with action panel

use super::field_renderer::{draw_field, draw_help_text, field_height};
use crate::app::App;
use crate::state::{FormKind, FormStatus};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw any inquiry form: fields on the left, submit panel on the right
pub fn draw_inquiry_form(frame: &mut Frame, area: Rect, app: &App, kind: FormKind) {
    let Some(controller) = app.state.controller(kind) else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(main_chunks[0]);
    frame.render_widget(block, main_chunks[0]);

    let form = controller.form();
    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in form.fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            field,
            idx == form.active_field_index,
            controller.error_for(field.name()),
        );
    }

    draw_help_text(
        frame,
        chunks[chunks.len() - 1],
        "* required  ←/→ choose option  Enter in message adds a line",
    );

    draw_action_panel(frame, main_chunks[1], app, kind);
}

fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App, kind: FormKind) {
    let Some(controller) = app.state.controller(kind) else {
        return;
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),
            Constraint::Min(0), // Status
        ])
        .split(inner);

    let (label, enabled) = match controller.status() {
        FormStatus::Submitting => ("Submitting…", false),
        _ if !app.state.relay_configured => ("Submit", false),
        _ => ("Submit (^S)", true),
    };
    render_action_button(frame, chunks[0], label, enabled, Color::Green);

    let invalid = controller.errors().len();
    let mut lines = vec![];
    if !app.state.relay_configured {
        lines.push(Line::from(Span::styled(
            "Form is not configured yet",
            Style::default().fg(Color::Magenta),
        )));
    }
    if invalid > 0 {
        lines.push(Line::from(Span::styled(
            format!("{invalid} field(s) need attention"),
            Style::default().fg(Color::Red),
        )));
    }
    if controller.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Sending your enquiry…",
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        chunks[2],
    );
}
