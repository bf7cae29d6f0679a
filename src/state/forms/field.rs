//! Form field value objects

use crate::validation::{FieldKind, FieldSpec, ValidationResult};
use chrono::NaiveDate;

/// Represents a single form field with its rule and raw value
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    value: String,
}

impl FormField {
    /// Create an empty field for a rule table row
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    /// Raw value as typed
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Long free-text fields render across several lines
    pub fn is_multiline(&self) -> bool {
        matches!(self.spec.kind, FieldKind::FreeText { min_len } if min_len >= 10)
    }

    pub fn is_select(&self) -> bool {
        matches!(self.spec.kind, FieldKind::Select { .. })
    }

    /// Replace the value, applying entry-time normalization
    pub fn set_text(&mut self, value: &str) {
        self.value = self.spec.kind.normalize_input(value);
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if !self.spec.kind.accepts_char(c) {
            return;
        }
        self.value.push(c);
        self.value = self.spec.kind.normalize_input(&self.value);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match self.spec.kind {
            // Selects are cleared as a whole
            FieldKind::Select { .. } => self.value.clear(),
            _ => {
                self.value.pop();
            }
        }
    }

    /// Step through a select field's options (wraps around)
    pub fn cycle_option(&mut self, forward: bool) {
        let FieldKind::Select { options } = self.spec.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options.iter().position(|o| *o == self.value);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.value = options[next].to_string();
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn validate(&self, today: NaiveDate) -> ValidationResult {
        self.spec.validate(&self.value, today)
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.spec.kind {
            FieldKind::Select { .. } if self.value.is_empty() => "← choose →".to_string(),
            FieldKind::Select { .. } => format!("‹ {} ›", self.value),
            FieldKind::Date if self.value.is_empty() => "YYYY-MM-DD".to_string(),
            _ => self.value.clone(),
        }
    }
}
