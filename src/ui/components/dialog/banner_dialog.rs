//! Success and error banner dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::{Banner, BannerTone};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render a form banner as a centered overlay
pub fn render_banner_dialog(frame: &mut Frame, banner: &Banner) {
    let (title, color) = match banner.tone {
        BannerTone::Success => ("Enquiry Sent", Color::Green),
        BannerTone::Error => ("Could Not Send", Color::Red),
        BannerTone::Fatal => ("Form Unavailable", Color::Magenta),
    };

    let action = match banner.tone {
        BannerTone::Success => " to close",
        BannerTone::Error => " to edit and try again",
        BannerTone::Fatal => " to dismiss",
    };

    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(action),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: color,
            border_color: color,
            message: &banner.message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
