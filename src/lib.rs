//! Inquiry TUI - admission booking and contact forms in the terminal
//!
//! Validates each form locally and hands clean submissions to a third-party
//! form relay.

pub mod app;
pub mod config;
pub mod events;
pub mod relay;
pub mod state;
pub mod ui;
pub mod validation;
