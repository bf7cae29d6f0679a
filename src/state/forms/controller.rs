//! Form controller: input events to the validator, submit events to the relay
//!
//! ```text
//! Idle --submit, invalid--> Idle (inline errors, no request)
//! Idle --submit, valid--> Submitting --Success--> SuccessDisplayed --dismiss/timeout--> Idle
//!                         Submitting --NetworkError|Timeout--> Idle (values kept)
//! ```

use super::field::FormField;
use super::form_state::{Form, FormKind, InquiryForm};
use super::snapshot::FormSnapshot;
use crate::relay::{SubmissionOutcome, Submitter};
use crate::validation::{EmailPolicy, FieldErrors, ValidationResult};
use chrono::NaiveDate;
use std::time::{Duration, Instant};

/// Submission lifecycle of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    SuccessDisplayed {
        since: Instant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Success,
    /// The user can fix things and resubmit
    Error,
    /// Resubmitting cannot help until configuration changes
    Fatal,
}

/// Form-level message shown above the fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub tone: BannerTone,
}

/// Why a submit request did not start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight
    InFlight,
    Invalid(FieldErrors),
}

/// Owns one form's values, inline errors and submission state
#[derive(Debug, Clone)]
pub struct FormController {
    form: InquiryForm,
    errors: FieldErrors,
    status: FormStatus,
    banner: Option<Banner>,
    success_display: Duration,
}

impl FormController {
    pub fn new(kind: FormKind, email_policy: EmailPolicy, success_display: Duration) -> Self {
        Self {
            form: InquiryForm::new(kind, email_policy),
            errors: FieldErrors::new(),
            status: FormStatus::Idle,
            banner: None,
            success_display,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.form.kind
    }

    pub fn form(&self) -> &InquiryForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn next_field(&mut self) {
        self.form.next_field();
    }

    pub fn prev_field(&mut self) {
        self.form.prev_field();
    }

    /// Type a character into the focused field
    pub fn input_char(&mut self, c: char, today: NaiveDate) {
        self.edit_active(today, |field| field.push_char(c));
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self, today: NaiveDate) {
        self.edit_active(today, |field| field.pop_char());
    }

    /// Step the focused select field through its options
    pub fn cycle_option(&mut self, forward: bool, today: NaiveDate) {
        self.edit_active(today, |field| field.cycle_option(forward));
    }

    /// Replace a field's value by name. Returns false for unknown fields or
    /// while a submission is in flight.
    pub fn set_field(&mut self, name: &str, value: &str, today: NaiveDate) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(index) = self.form.fields.iter().position(|f| f.name() == name) else {
            return false;
        };
        self.form.fields[index].set_text(value);
        self.revalidate(index, today);
        true
    }

    /// Validate everything and, when clean, capture the snapshot and enter
    /// `Submitting`.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<FormSnapshot, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        if matches!(self.status, FormStatus::SuccessDisplayed { .. }) {
            self.status = FormStatus::Idle;
        }

        self.errors = self.form.validate_all(today);
        if !self.errors.is_empty() {
            if let Some(first) = self
                .form
                .fields
                .iter()
                .position(|f| self.errors.contains_key(f.name()))
            {
                self.form.set_active_field(first);
            }
            tracing::debug!(
                "{} form blocked by {} invalid field(s)",
                self.kind().routing().form_type,
                self.errors.len()
            );
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        }

        self.banner = None;
        self.status = FormStatus::Submitting;
        Ok(self.form.snapshot())
    }

    /// Apply the outcome of the in-flight submission
    pub fn complete_submit(&mut self, outcome: &SubmissionOutcome, now: Instant) {
        match outcome {
            SubmissionOutcome::Success { .. } => {
                self.form.reset();
                self.errors.clear();
                self.status = FormStatus::SuccessDisplayed { since: now };
                self.banner = Some(Banner {
                    message: outcome.user_message(),
                    tone: BannerTone::Success,
                });
            }
            SubmissionOutcome::ValidationFailed(errors) => {
                self.errors = errors.clone();
                self.status = FormStatus::Idle;
            }
            SubmissionOutcome::NetworkError(_)
            | SubmissionOutcome::Timeout
            | SubmissionOutcome::ConfigurationError(_) => {
                self.status = FormStatus::Idle;
                self.banner = Some(Banner {
                    message: outcome.user_message(),
                    tone: if outcome.is_retryable() {
                        BannerTone::Error
                    } else {
                        BannerTone::Fatal
                    },
                });
            }
        }
    }

    /// Validate, send and apply the outcome in one step.
    ///
    /// Returns `None` when the submit gate is closed.
    pub async fn submit(
        &mut self,
        submitter: &Submitter,
        today: NaiveDate,
    ) -> Option<SubmissionOutcome> {
        let outcome = match self.begin_submit(today) {
            Ok(snapshot) => submitter.submit(&snapshot).await,
            Err(SubmitBlocked::Invalid(errors)) => {
                return Some(SubmissionOutcome::ValidationFailed(errors))
            }
            Err(SubmitBlocked::InFlight) => return None,
        };
        self.complete_submit(&outcome, Instant::now());
        Some(outcome)
    }

    /// Close the success panel or clear a form-level error
    pub fn dismiss(&mut self) {
        if matches!(self.status, FormStatus::SuccessDisplayed { .. }) {
            self.status = FormStatus::Idle;
        }
        self.banner = None;
    }

    /// Auto-close the success panel once its display time has passed
    pub fn tick(&mut self, now: Instant) {
        if let FormStatus::SuccessDisplayed { since } = self.status {
            if now.saturating_duration_since(since) >= self.success_display {
                self.dismiss();
            }
        }
    }

    fn accepts_input(&self) -> bool {
        !self.is_submitting()
    }

    fn edit_active(&mut self, today: NaiveDate, edit: impl FnOnce(&mut FormField)) {
        if !self.accepts_input() {
            return;
        }
        if matches!(self.status, FormStatus::SuccessDisplayed { .. }) {
            self.dismiss();
        }
        edit(self.form.get_active_field_mut());
        self.revalidate(self.form.active_field_index, today);
    }

    fn revalidate(&mut self, index: usize, today: NaiveDate) {
        let field = &self.form.fields[index];
        match field.validate(today) {
            ValidationResult::Valid => {
                self.errors.remove(field.name());
            }
            ValidationResult::Invalid(msg) => {
                self.errors.insert(field.name().to_string(), msg);
            }
        }
    }
}
