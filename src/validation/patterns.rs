//! Compiled field patterns

use regex::Regex;
use std::sync::LazyLock;

/// Two or more alphabetic tokens, each separated by a single space,
/// apostrophe or hyphen.
pub static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+(?:[ '-][A-Za-z]+)+$").expect("full name pattern compiles")
});

/// Indian mobile numbering: ten digits starting with 6-9.
pub static MOBILE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("phone pattern compiles"));

/// Local part starts with a letter; every domain label starts with a letter
/// and at least one dot follows the `@`.
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9._%+-]*@[A-Za-z][A-Za-z0-9-]*(?:\.[A-Za-z][A-Za-z0-9-]*)+$")
        .expect("email pattern compiles")
});

/// ISO calendar date shape, checked before parsing.
pub static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_allows_any_separator() {
        assert!(FULL_NAME.is_match("Mary-Jane O'Neil"));
        assert!(FULL_NAME.is_match("Anna Maria Lopez"));
        assert!(FULL_NAME.is_match("Jean-Luc"));
        assert!(FULL_NAME.is_match("O'Neil"));
    }

    #[test]
    fn test_full_name_rejects_double_space() {
        assert!(!FULL_NAME.is_match("Jane  Doe"));
        assert!(!FULL_NAME.is_match("Jane- Doe"));
        assert!(!FULL_NAME.is_match("Jane--Doe"));
        assert!(!FULL_NAME.is_match("-Jane Doe"));
    }

    #[test]
    fn test_email_requires_dotted_domain() {
        assert!(EMAIL.is_match("a.b+c@school.edu.in"));
        assert!(!EMAIL.is_match("john@localhost"));
        assert!(!EMAIL.is_match("john@mail.1com"));
    }
}
