//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Form(kind) => forms::draw_inquiry_form(frame, main_area, app, kind),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Success and failure banners overlay the form
    if let Some(banner) = app.state.active_controller().and_then(|c| c.banner()) {
        components::render_banner_dialog(frame, banner);
    }
}
