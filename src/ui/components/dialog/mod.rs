//! Dialog components for TUI

mod banner_dialog;
mod base;

pub use banner_dialog::render_banner_dialog;
