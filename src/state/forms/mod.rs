//! Form domain layer
//!
//! Field values, the catalogue of inquiry forms, submit-time snapshots and
//! the controller that drives validation and submission for one form.

mod controller;
mod field;
mod form_state;
mod snapshot;

pub use controller::{Banner, BannerTone, FormController, FormStatus, SubmitBlocked};
pub use field::FormField;
pub use form_state::{FormKind, InquiryForm, Routing};
pub use snapshot::FormSnapshot;
