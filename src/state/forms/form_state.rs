//! Form catalogue and per-form field state

use super::field::FormField;
use super::snapshot::FormSnapshot;
use crate::validation::{validate_all, EmailPolicy, FieldErrors, FieldKind, FieldSpec};
use chrono::NaiveDate;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
}

pub const PROGRAMS: &[&str] = &["Preschool", "Primary School", "Pre-University (PUC)"];
pub const CHILD_AGES: &[&str] = &[
    "1.5 - 2.5 years",
    "2.5 - 3.5 years",
    "3.5 - 4.5 years",
    "4.5 - 5.5 years",
];
pub const STREAMS: &[&str] = &["Science (PCMB)", "Science (PCMC)", "Commerce", "Arts"];
pub const GRADES: &[&str] = &["Grade 1", "Grade 2", "Grade 3", "Grade 4", "Grade 5"];

const MESSAGE: FieldKind = FieldKind::FreeText { min_len: 10 };

/// The inquiry forms offered by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    Booking,
    PreschoolContact,
    PucContact,
    PrimaryContact,
    GeneralContact,
}

/// Static relay metadata attached to every submission of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    pub subject: &'static str,
    pub from_name: &'static str,
    pub form_type: &'static str,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::Booking,
        FormKind::PreschoolContact,
        FormKind::PucContact,
        FormKind::PrimaryContact,
        FormKind::GeneralContact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Booking => "Book a Campus Visit",
            FormKind::PreschoolContact => "Preschool Enquiry",
            FormKind::PucContact => "PUC Enquiry",
            FormKind::PrimaryContact => "Primary School Enquiry",
            FormKind::GeneralContact => "Contact Us",
        }
    }

    pub fn routing(&self) -> Routing {
        match self {
            FormKind::Booking => Routing {
                subject: "New Campus Visit Booking",
                from_name: "Admissions Booking",
                form_type: "booking",
            },
            FormKind::PreschoolContact => Routing {
                subject: "New Preschool Enquiry",
                from_name: "Preschool Website",
                form_type: "preschool_contact",
            },
            FormKind::PucContact => Routing {
                subject: "New PUC Enquiry",
                from_name: "PUC Website",
                form_type: "puc_contact",
            },
            FormKind::PrimaryContact => Routing {
                subject: "New Primary School Enquiry",
                from_name: "Primary School Website",
                form_type: "primary_contact",
            },
            FormKind::GeneralContact => Routing {
                subject: "New Contact Message",
                from_name: "Website Contact Form",
                form_type: "general_contact",
            },
        }
    }

    /// Email policy used when the configuration does not override it
    pub fn default_email_policy(&self) -> EmailPolicy {
        match self {
            FormKind::Booking => EmailPolicy::GmailOnly,
            _ => EmailPolicy::AnyDomain,
        }
    }

    /// Rule table for this form
    pub fn field_specs(&self, email_policy: EmailPolicy) -> Vec<FieldSpec> {
        let name = FieldSpec::required("name", "Full Name", FieldKind::FullName);
        let email = FieldSpec::required("email", "Email Address", FieldKind::Email(email_policy));
        let phone = FieldSpec::required("phone", "Phone Number", FieldKind::Phone);
        let message = FieldSpec::required("message", "Message", MESSAGE);

        match self {
            FormKind::Booking => vec![
                FieldSpec::required("parent_name", "Parent Name", FieldKind::FullName),
                FieldSpec::required("child_name", "Child Name", FieldKind::FullName),
                email,
                phone,
                FieldSpec::optional(
                    "program",
                    "Program",
                    FieldKind::Select { options: PROGRAMS },
                ),
                FieldSpec::required("preferred_date", "Preferred Date", FieldKind::Date),
                FieldSpec::optional("notes", "Notes", MESSAGE),
            ],
            FormKind::PreschoolContact => vec![
                name,
                email,
                phone,
                FieldSpec::required(
                    "child_age",
                    "Child Age",
                    FieldKind::Select {
                        options: CHILD_AGES,
                    },
                ),
                message,
            ],
            FormKind::PucContact => vec![
                name,
                email,
                phone,
                FieldSpec::required("stream", "Stream", FieldKind::Select { options: STREAMS }),
                message,
            ],
            FormKind::PrimaryContact => vec![
                name,
                email,
                phone,
                FieldSpec::required("grade", "Grade", FieldKind::Select { options: GRADES }),
                message,
            ],
            FormKind::GeneralContact => vec![
                name,
                email,
                phone,
                FieldSpec::required("topic", "Subject", FieldKind::FreeText { min_len: 3 }),
                message,
            ],
        }
    }
}

/// Field values and focus for one inquiry form
#[derive(Debug, Clone)]
pub struct InquiryForm {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl InquiryForm {
    pub fn new(kind: FormKind, email_policy: EmailPolicy) -> Self {
        Self {
            kind,
            fields: kind
                .field_specs(email_policy)
                .into_iter()
                .map(FormField::new)
                .collect(),
            active_field_index: 0,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Every field back to its empty default, focus on the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.as_text().is_empty())
    }

    /// Run the full rule set
    pub fn validate_all(&self, today: NaiveDate) -> FieldErrors {
        validate_all(
            self.fields.iter().map(|f| (&f.spec, f.as_text())),
            today,
        )
    }

    /// Capture the current values for submission
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(self.kind, &self.fields)
    }
}

impl Form for InquiryForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active_field_index]
    }
}
