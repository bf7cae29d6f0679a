//! Field rule table and the pure validation functions behind it

use super::patterns::{EMAIL, FULL_NAME, ISO_DATE, MOBILE_PHONE};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Maximum digits accepted while typing a phone number
pub const PHONE_DIGITS: usize = 10;

pub const PHONE_MESSAGE: &str = "Please enter a valid 10-digit phone number";
pub const FULL_NAME_MESSAGE: &str = "Enter full name (first and last name)";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email address is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const GMAIL_MESSAGE: &str = "Please enter a valid Gmail address (name@gmail.com)";
pub const DATE_FORMAT_MESSAGE: &str = "Please enter a valid date (YYYY-MM-DD)";

/// Which domains an email field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailPolicy {
    #[default]
    AnyDomain,
    /// Only `@gmail.com` addresses (the booking form's historical rule)
    GmailOnly,
}

/// The validation rule a field is held to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FullName,
    Phone,
    Email(EmailPolicy),
    Select { options: &'static [&'static str] },
    FreeText { min_len: usize },
    /// ISO `YYYY-MM-DD`, today or later
    Date,
}

impl FieldKind {
    /// Normalize raw input at entry time
    pub fn normalize_input(&self, raw: &str) -> String {
        match self {
            FieldKind::Phone => raw
                .chars()
                .filter(char::is_ascii_digit)
                .take(PHONE_DIGITS)
                .collect(),
            _ => raw.to_string(),
        }
    }

    /// Whether a typed character can ever be part of a value of this kind
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            FieldKind::Phone => c.is_ascii_digit(),
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Select { .. } => false,
            FieldKind::FreeText { .. } => c == '\n' || !c.is_control(),
            _ => !c.is_control(),
        }
    }
}

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Field name to error message, ordered by field name
pub type FieldErrors = BTreeMap<String, String>;

/// One row of a form's rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    /// Validate a raw value against this row
    pub fn validate(&self, raw: &str, today: NaiveDate) -> ValidationResult {
        validate(self.kind, self.label, raw, self.required, today)
    }
}

/// Validate one raw value.
///
/// Pure: the same inputs always give the same result. `today` is passed in
/// rather than read from the clock so date rules stay deterministic.
pub fn validate(
    kind: FieldKind,
    label: &str,
    raw: &str,
    required: bool,
    today: NaiveDate,
) -> ValidationResult {
    let is_blank = match kind {
        FieldKind::Phone => !raw.chars().any(|c| c.is_ascii_digit()),
        _ => raw.trim().is_empty(),
    };

    if is_blank {
        if !required {
            return ValidationResult::Valid;
        }
        return ValidationResult::Invalid(required_message(kind, label));
    }

    match kind {
        FieldKind::FullName => check(FULL_NAME.is_match(raw.trim()), FULL_NAME_MESSAGE),
        FieldKind::Phone => check(is_valid_phone(raw), PHONE_MESSAGE),
        FieldKind::Email(policy) => validate_email(raw.trim(), policy),
        FieldKind::Select { options } => check(
            options.iter().any(|option| *option == raw.trim()),
            &select_message(label),
        ),
        FieldKind::FreeText { min_len } => check(
            raw.trim().chars().count() >= min_len,
            &format!("{label} must be at least {min_len} characters"),
        ),
        FieldKind::Date => validate_date(raw.trim(), label, today),
    }
}

/// Run every row of a form and collect the failures
pub fn validate_all<'a, I>(entries: I, today: NaiveDate) -> FieldErrors
where
    I: IntoIterator<Item = (&'a FieldSpec, &'a str)>,
{
    entries
        .into_iter()
        .filter_map(|(spec, raw)| match spec.validate(raw, today) {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(msg) => Some((spec.name.to_string(), msg)),
        })
        .collect()
}

fn check(ok: bool, message: &str) -> ValidationResult {
    if ok {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(message.to_string())
    }
}

fn required_message(kind: FieldKind, label: &str) -> String {
    match kind {
        FieldKind::Email(_) => EMAIL_REQUIRED_MESSAGE.to_string(),
        FieldKind::Select { .. } => select_message(label),
        _ => format!("{label} is required"),
    }
}

fn select_message(label: &str) -> String {
    format!("Please select a {}", label.to_lowercase())
}

fn is_valid_phone(raw: &str) -> bool {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if !MOBILE_PHONE.is_match(&digits) {
        return false;
    }
    // 9999999999 and friends
    let first = digits.as_bytes()[0];
    !digits.bytes().all(|b| b == first)
}

fn validate_email(email: &str, policy: EmailPolicy) -> ValidationResult {
    match policy {
        EmailPolicy::AnyDomain => check(EMAIL.is_match(email), EMAIL_MESSAGE),
        EmailPolicy::GmailOnly => check(
            EMAIL.is_match(email) && email.to_ascii_lowercase().ends_with("@gmail.com"),
            GMAIL_MESSAGE,
        ),
    }
}

fn validate_date(value: &str, label: &str, today: NaiveDate) -> ValidationResult {
    if !ISO_DATE.is_match(value) {
        return ValidationResult::Invalid(DATE_FORMAT_MESSAGE.to_string());
    }
    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return ValidationResult::Invalid(DATE_FORMAT_MESSAGE.to_string());
    };
    check(date >= today, &format!("{label} cannot be in the past"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn run(kind: FieldKind, raw: &str) -> ValidationResult {
        validate(kind, "Field", raw, true, today())
    }

    const GRADES: &[&str] = &["Grade 1", "Grade 2"];

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_mobile_number() {
            assert!(run(FieldKind::Phone, "9876543210").is_valid());
            assert!(run(FieldKind::Phone, "6000000001").is_valid());
        }

        #[test]
        fn test_rejects_bad_leading_digit() {
            assert_eq!(
                run(FieldKind::Phone, "1234567890"),
                ValidationResult::Invalid(PHONE_MESSAGE.to_string())
            );
            assert!(!run(FieldKind::Phone, "5876543210").is_valid());
        }

        #[test]
        fn test_rejects_repeated_digit() {
            assert!(!run(FieldKind::Phone, "9999999999").is_valid());
            assert!(!run(FieldKind::Phone, "6666666666").is_valid());
        }

        #[test]
        fn test_rejects_wrong_length() {
            assert!(!run(FieldKind::Phone, "987654321").is_valid());
            assert!(!run(FieldKind::Phone, "98765432101").is_valid());
        }

        #[test]
        fn test_ignores_formatting_characters() {
            assert!(run(FieldKind::Phone, "98765 43210").is_valid());
            assert!(run(FieldKind::Phone, "(987) 654-3210").is_valid());
        }

        #[test]
        fn test_empty_is_required_error() {
            assert_eq!(
                validate(FieldKind::Phone, "Phone Number", "", true, today()),
                ValidationResult::Invalid("Phone Number is required".to_string())
            );
            assert!(!run(FieldKind::Phone, "--").is_valid());
        }

        #[test]
        fn test_normalize_strips_and_caps() {
            assert_eq!(FieldKind::Phone.normalize_input("+91 98765-43210"), "9198765432");
            assert_eq!(FieldKind::Phone.normalize_input("98a7"), "987");
        }
    }

    mod full_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_first_and_last() {
            assert!(run(FieldKind::FullName, "Jane Doe").is_valid());
            assert!(run(FieldKind::FullName, "  Jane Doe  ").is_valid());
        }

        #[test]
        fn test_rejects_single_word() {
            assert_eq!(
                run(FieldKind::FullName, "Jane"),
                ValidationResult::Invalid(FULL_NAME_MESSAGE.to_string())
            );
        }

        #[test]
        fn test_hyphen_and_apostrophe_separate_tokens() {
            for name in ["Mary-Jane", "O'Neil", "Jean-Luc", "Mary-Jane O'Neil"] {
                assert!(run(FieldKind::FullName, name).is_valid(), "{name}");
            }
            for name in ["Jane", "Jane  Doe", "Jane- Doe", "Jane'"] {
                assert_eq!(
                    run(FieldKind::FullName, name),
                    ValidationResult::Invalid(FULL_NAME_MESSAGE.to_string()),
                    "{name}"
                );
            }
        }

        #[test]
        fn test_rejects_digits() {
            assert!(!run(FieldKind::FullName, "Jane123").is_valid());
            assert!(!run(FieldKind::FullName, "Jane Doe2").is_valid());
        }

        #[test]
        fn test_empty_uses_label() {
            assert_eq!(
                validate(FieldKind::FullName, "Parent Name", "   ", true, today()),
                ValidationResult::Invalid("Parent Name is required".to_string())
            );
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        const ANY: FieldKind = FieldKind::Email(EmailPolicy::AnyDomain);
        const GMAIL: FieldKind = FieldKind::Email(EmailPolicy::GmailOnly);

        #[test]
        fn test_general_rule() {
            assert!(run(ANY, "john@gmail.com").is_valid());
            assert!(run(ANY, "john.smith@school.co.in").is_valid());
            assert!(!run(ANY, "9x@gmail.com").is_valid());
            assert!(!run(ANY, "john@1mail.com").is_valid());
            assert!(!run(ANY, "john@gmail").is_valid());
        }

        #[test]
        fn test_empty_message() {
            assert_eq!(
                run(ANY, " "),
                ValidationResult::Invalid(EMAIL_REQUIRED_MESSAGE.to_string())
            );
        }

        #[test]
        fn test_gmail_only_policy() {
            assert!(run(GMAIL, "alice@gmail.com").is_valid());
            assert!(run(GMAIL, "Alice@GMAIL.com").is_valid());
            assert_eq!(
                run(GMAIL, "alice@school.edu"),
                ValidationResult::Invalid(GMAIL_MESSAGE.to_string())
            );
        }
    }

    mod select {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_requires_choice() {
            let kind = FieldKind::Select { options: GRADES };
            assert_eq!(
                validate(kind, "Grade", "", true, today()),
                ValidationResult::Invalid("Please select a grade".to_string())
            );
            assert!(validate(kind, "Grade", "Grade 2", true, today()).is_valid());
            assert!(!validate(kind, "Grade", "Grade 9", true, today()).is_valid());
        }
    }

    mod free_text {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_min_length_boundary() {
            let kind = FieldKind::FreeText { min_len: 10 };
            assert!(run(kind, "0123456789").is_valid());
            assert_eq!(
                validate(kind, "Message", "012345678", true, today()),
                ValidationResult::Invalid("Message must be at least 10 characters".to_string())
            );
        }

        #[test]
        fn test_length_is_measured_after_trim() {
            let kind = FieldKind::FreeText { min_len: 3 };
            assert!(!run(kind, "  ab  ").is_valid());
            assert!(run(kind, " abc ").is_valid());
        }
    }

    mod date {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_today_and_future_are_valid() {
            assert!(run(FieldKind::Date, "2026-03-15").is_valid());
            assert!(run(FieldKind::Date, "2027-01-01").is_valid());
        }

        #[test]
        fn test_past_is_invalid() {
            assert_eq!(
                validate(FieldKind::Date, "Preferred Date", "2026-03-14", true, today()),
                ValidationResult::Invalid("Preferred Date cannot be in the past".to_string())
            );
        }

        #[test]
        fn test_malformed_dates() {
            assert!(!run(FieldKind::Date, "15-03-2026").is_valid());
            assert!(!run(FieldKind::Date, "2026-02-30").is_valid());
        }
    }

    #[test]
    fn test_optional_empty_is_valid_but_content_is_checked() {
        let kind = FieldKind::FreeText { min_len: 10 };
        assert!(validate(kind, "Notes", "", false, today()).is_valid());
        assert!(!validate(kind, "Notes", "short", false, today()).is_valid());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let inputs = ["Jane Doe", "Jane", "", "Jane123"];
        for input in inputs {
            let first = run(FieldKind::FullName, input);
            let second = run(FieldKind::FullName, input);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_validate_all_collects_failures() {
        let name = FieldSpec::required("name", "Full Name", FieldKind::FullName);
        let phone = FieldSpec::required("phone", "Phone Number", FieldKind::Phone);
        let notes = FieldSpec::optional("notes", "Notes", FieldKind::FreeText { min_len: 10 });

        let errors = validate_all(
            [(&name, "Jane Doe"), (&phone, "1234567890"), (&notes, "")],
            today(),
        );

        let mut expected = FieldErrors::new();
        expected.insert("phone".to_string(), PHONE_MESSAGE.to_string());
        assert_eq!(errors, expected);
    }

    #[test]
    fn test_accepts_char_filters_by_kind() {
        assert!(FieldKind::Phone.accepts_char('7'));
        assert!(!FieldKind::Phone.accepts_char('a'));
        assert!(FieldKind::Date.accepts_char('-'));
        assert!(!FieldKind::Select { options: GRADES }.accepts_char('x'));
        assert!(FieldKind::FullName.accepts_char('\''));
    }
}
