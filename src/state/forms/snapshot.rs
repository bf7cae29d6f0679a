//! Immutable capture of a form at submit time

use super::field::FormField;
use super::form_state::FormKind;
use std::collections::BTreeMap;

/// Field values captured when a submission starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    form: FormKind,
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    /// Trimmed values of every field; empty optional fields are left out
    pub fn capture(form: FormKind, fields: &[FormField]) -> Self {
        let values = fields
            .iter()
            .filter(|f| f.is_required() || !f.as_text().trim().is_empty())
            .map(|f| (f.name().to_string(), f.as_text().trim().to_string()))
            .collect();
        Self { form, values }
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}
