//! Password strength scoring for the live meter.
//!
//! The score is advisory only; it never blocks submission beyond the
//! validator's own minimums. Callers are expected to skip the scorer (and
//! hide the meter) for an empty password.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Coarse category shown next to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

/// Severity tier used to color strength and validation feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Result of scoring one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    /// Satisfied conditions, 0..=5.
    pub points: u8,
    /// `points / 5 * 100`.
    pub percent: u8,
    pub label: StrengthLabel,
    pub severity: Severity,
}

/// Score a password with five independent, additive conditions:
/// length >= 8, length >= 12, mixed case (one combined condition), at least
/// one digit, at least one character outside `[A-Za-z0-9]`.
///
/// Lengths are counted in characters, not bytes, so multi-byte input is not
/// over-credited.
pub fn score(password: &str) -> Strength {
    let len = password.chars().count();

    let mut points = 0u8;
    if len >= 8 {
        points += 1;
    }
    if len >= 12 {
        points += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        points += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        points += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        points += 1;
    }

    let (label, severity) = match points {
        0..=2 => (StrengthLabel::Weak, Severity::Error),
        3 => (StrengthLabel::Medium, Severity::Warning),
        _ => (StrengthLabel::Strong, Severity::Success),
    };

    Strength {
        points,
        percent: points * 20,
        label,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_passwords_earn_no_length_points() {
        for pw in ["", "a", "Ab1!", "abcdefg"] {
            let s = score(pw);
            // anything below 8 chars can only collect the three class points
            assert!(s.points <= 3, "{pw:?} scored {}", s.points);
        }
    }

    #[test]
    fn four_of_five_conditions_is_strong() {
        let s = score("Ab1!defgh");
        assert_eq!(s.points, 4);
        assert_eq!(s.percent, 80);
        assert_eq!(s.label, StrengthLabel::Strong);
        assert_eq!(s.severity, Severity::Success);
    }

    #[test]
    fn trivial_password_is_weak() {
        let s = score("abc");
        assert_eq!(s.points, 0);
        assert_eq!(s.percent, 0);
        assert_eq!(s.label, StrengthLabel::Weak);
        assert_eq!(s.severity, Severity::Error);
    }

    #[test]
    fn three_points_is_medium() {
        // >= 8 chars, mixed case, digit; no symbol, shorter than 12
        let s = score("Abcdefg1");
        assert_eq!(s.points, 3);
        assert_eq!(s.percent, 60);
        assert_eq!(s.label, StrengthLabel::Medium);
        assert_eq!(s.severity, Severity::Warning);
    }

    #[test]
    fn all_five_conditions() {
        let s = score("Abcdefghijk1!");
        assert_eq!(s.points, 5);
        assert_eq!(s.percent, 100);
        assert_eq!(s.label, StrengthLabel::Strong);
    }

    #[test]
    fn mixed_case_is_one_combined_condition() {
        // lowercase only: no case point
        assert_eq!(score("abcdefgh").points, 1);
        // uppercase only: still no case point
        assert_eq!(score("ABCDEFGH").points, 1);
    }

    #[test]
    fn non_ascii_counts_as_symbol_not_length_padding() {
        // 8 characters, one of them outside [A-Za-z0-9]
        let s = score("Heslo1čx");
        assert_eq!(s.points, 4);
    }
}
