//! Home view: pick a form

use crate::app::App;
use crate::state::FormKind;
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(
            " Admissions & Enquiries ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " press b to book a campus visit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = FormKind::ALL
        .iter()
        .map(|kind| {
            let pending = app
                .state
                .controller(*kind)
                .is_some_and(|c| !c.form().is_empty());
            let mut spans = vec![Span::raw(format!("  {}", kind.title()))];
            if pending {
                spans.push(Span::styled(
                    "  (draft)",
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Forms ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    render_scrollable_list(frame, chunks[1], list, app.state.selected_index);
}
