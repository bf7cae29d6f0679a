//! Field validation
//!
//! One shared rule table keyed by [`FieldKind`], used by every inquiry form.
//! Validation never fails with an `Err`: results are values that the form
//! controller stores and renders inline.

mod patterns;
mod rules;

pub use rules::{validate_all, EmailPolicy, FieldErrors, FieldKind, FieldSpec, ValidationResult};
