//! Declarative per-field validation rules.
//!
//! Each field owns an ordered chain of predicate checks; on a failing check
//! exactly that check's message is reported and the rest of the chain is
//! skipped. Fields never influence each other.
//!
//! Required-ness of the name, password and region fields is a product
//! configuration, not derived logic. The two shipped variants only differ
//! in the [`Required`] set they hand to the validator.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::regions::is_region;
use crate::values::FormValues;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex");
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").expect("username regex");
}

/// One form field. The `Display`/serde names match the camelCase keys used
/// by [`FormValues`] snapshots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Username,
    Email,
    Password,
    Region,
}

impl Field {
    /// Label shown next to the input widget.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Region => "Region",
        }
    }
}

/// The set of fields a variant treats as mandatory.
///
/// Username and email are mandatory in every variant; constructors below
/// always include them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required(HashSet<Field>);

impl Required {
    /// The relaxed variant: only username and email are mandatory.
    pub fn relaxed() -> Self {
        Self(HashSet::from([Field::Username, Field::Email]))
    }

    /// The strict variant: every field is mandatory.
    pub fn strict() -> Self {
        Self(HashSet::from([
            Field::FirstName,
            Field::LastName,
            Field::Username,
            Field::Email,
            Field::Password,
            Field::Region,
        ]))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }
}

/// Field-to-message mapping produced by one validation pass. A field that
/// is absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

/// Maps raw [`FormValues`] to a [`ValidationReport`] using independent
/// per-field rule chains.
///
/// Pure and synchronous: the same input always yields the same report.
#[derive(Debug, Clone)]
pub struct Validator {
    required: Required,
}

impl Validator {
    pub fn new(required: Required) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &Required {
        &self.required
    }

    /// Validate every field. Per field, the first failing check wins.
    pub fn validate(&self, values: &FormValues) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (field, value) in [
            (Field::FirstName, values.first_name.as_str()),
            (Field::LastName, values.last_name.as_str()),
            (Field::Username, values.username.as_str()),
            (Field::Email, values.email.as_str()),
            (Field::Password, values.password.as_str()),
            (Field::Region, values.region.as_str()),
        ] {
            if let Some(message) = self.check_field(field, value) {
                report.insert(field, message);
            }
        }

        report
    }

    fn check_field(&self, field: Field, value: &str) -> Option<String> {
        if value.is_empty() {
            return if self.required.contains(field) {
                Some(format!("{} is required", field.label()))
            } else {
                None
            };
        }

        match field {
            Field::FirstName | Field::LastName => min_chars(field, value, 2),
            Field::Username => check_username(value),
            Field::Email => check_email(value),
            Field::Password => check_password(value),
            Field::Region => check_region(value),
        }
    }
}

fn min_chars(field: Field, value: &str, min: usize) -> Option<String> {
    if value.chars().count() < min {
        Some(format!(
            "{} must be at least {min} characters",
            field.label()
        ))
    } else {
        None
    }
}

fn check_username(value: &str) -> Option<String> {
    let len = value.chars().count();
    if len < 3 {
        Some("Username must be at least 3 characters".into())
    } else if len > 20 {
        Some("At most 20 characters".into())
    } else if !USERNAME_RE.is_match(value) {
        Some("Only letters, digits and underscore".into())
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<String> {
    if EMAIL_RE.is_match(value) {
        None
    } else {
        Some("Invalid email format".into())
    }
}

fn check_password(value: &str) -> Option<String> {
    if value.chars().count() < 8 {
        Some("Password must be at least 8 characters".into())
    } else if !value.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Must contain a lowercase letter".into())
    } else if !value.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Must contain an uppercase letter".into())
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        Some("Must contain a digit".into())
    } else {
        None
    }
}

fn check_region(value: &str) -> Option<String> {
    if is_region(value) {
        None
    } else {
        Some("Unknown region".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_values() -> FormValues {
        FormValues {
            first_name: "Jana".into(),
            last_name: "Nováková".into(),
            username: "valid_user1".into(),
            email: "jana@example.com".into(),
            password: "Silne1heslo".into(),
            region: "Vysočina".into(),
        }
    }

    #[test]
    fn valid_values_produce_empty_report() {
        let report = Validator::new(Required::strict()).validate(&valid_values());
        assert!(report.is_ok(), "unexpected errors: {report:?}");
    }

    #[test]
    fn username_too_short() {
        let values = FormValues {
            username: "ab".into(),
            ..valid_values()
        };
        let report = Validator::new(Required::relaxed()).validate(&values);
        assert_eq!(
            report.error(Field::Username),
            Some("Username must be at least 3 characters")
        );
    }

    #[test]
    fn username_charset_and_length_bounds() {
        let validator = Validator::new(Required::relaxed());

        let bad_charset = FormValues {
            username: "spaces not allowed".into(),
            ..valid_values()
        };
        assert_eq!(
            validator.validate(&bad_charset).error(Field::Username),
            Some("Only letters, digits and underscore")
        );

        let too_long = FormValues {
            username: "a".repeat(21),
            ..valid_values()
        };
        assert_eq!(
            validator.validate(&too_long).error(Field::Username),
            Some("At most 20 characters")
        );

        let ok = FormValues {
            username: "valid_user1".into(),
            ..valid_values()
        };
        assert_eq!(validator.validate(&ok).error(Field::Username), None);
    }

    #[test]
    fn email_grammar() {
        let validator = Validator::new(Required::relaxed());

        let bad = FormValues {
            email: "not-an-email".into(),
            ..valid_values()
        };
        assert_eq!(
            validator.validate(&bad).error(Field::Email),
            Some("Invalid email format")
        );

        let ok = FormValues {
            email: "a@b.com".into(),
            ..valid_values()
        };
        assert_eq!(validator.validate(&ok).error(Field::Email), None);
    }

    #[test]
    fn first_failing_rule_wins_per_field() {
        // too short AND missing character classes: only the length message
        let values = FormValues {
            password: "ab".into(),
            ..valid_values()
        };
        let report = Validator::new(Required::relaxed()).validate(&values);
        assert_eq!(
            report.error(Field::Password),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn password_class_checks_in_order() {
        let validator = Validator::new(Required::relaxed());
        let cases = [
            ("lowercase8", "Must contain an uppercase letter"),
            ("UPPERCASE8", "Must contain a lowercase letter"),
            ("Lowercase", "Must contain a digit"),
        ];
        for (pw, expected) in cases {
            let values = FormValues {
                password: pw.into(),
                ..valid_values()
            };
            assert_eq!(
                validator.validate(&values).error(Field::Password),
                Some(expected),
                "password {pw:?}"
            );
        }
    }

    #[test]
    fn optional_fields_accept_empty_values() {
        let values = FormValues {
            first_name: String::new(),
            last_name: String::new(),
            password: String::new(),
            region: String::new(),
            ..valid_values()
        };
        let report = Validator::new(Required::relaxed()).validate(&values);
        assert!(report.is_ok(), "unexpected errors: {report:?}");
    }

    #[test]
    fn strict_variant_requires_every_field() {
        let report = Validator::new(Required::strict()).validate(&FormValues::default());
        assert_eq!(report.len(), 6);
        assert_eq!(report.error(Field::Region), Some("Region is required"));
        assert_eq!(report.error(Field::Password), Some("Password is required"));
    }

    #[test]
    fn region_membership_is_checked_when_present() {
        let values = FormValues {
            region: "Nonexistent Region".into(),
            ..valid_values()
        };
        // checked in both variants once a value is present
        for required in [Required::relaxed(), Required::strict()] {
            let report = Validator::new(required).validate(&values);
            assert_eq!(report.error(Field::Region), Some("Unknown region"));
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let validator = Validator::new(Required::strict());
        let values = FormValues {
            username: "ab".into(),
            email: "broken".into(),
            ..FormValues::default()
        };
        let first = validator.validate(&values);
        let second = validator.validate(&values);
        assert_eq!(first, second);
    }

    #[test]
    fn short_optional_name_is_still_checked() {
        let values = FormValues {
            first_name: "J".into(),
            ..valid_values()
        };
        let report = Validator::new(Required::relaxed()).validate(&values);
        assert_eq!(
            report.error(Field::FirstName),
            Some("First name must be at least 2 characters")
        );
    }
}
