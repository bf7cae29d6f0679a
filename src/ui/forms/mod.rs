//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `inquiry_form`: Any inquiry form with its action panel

mod field_renderer;
mod inquiry_form;

pub use inquiry_form::draw_inquiry_form;
