//! Validation rules and their evaluator

use regex::Regex;
use std::sync::LazyLock;

/// Basic `local@domain.tld` shape. Not RFC 5322.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

/// Outcome of checking one value against one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Value satisfies the rule
    Pass,
    /// Value violates the rule; the field shows its error
    Fail,
    /// Not valid yet, but the error indicator is left as it is.
    /// Only produced by `EqualsField` when both values are empty.
    Unresolved,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        self == Verdict::Pass
    }
}

/// A single validation rule attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed value must not be empty
    NonEmpty,
    /// Trimmed value must not be empty and the character count must be in `min..=max`
    LengthRange { min: usize, max: usize },
    /// Value must look like an email address
    Email,
    /// Value must equal the named field's value and must not be blank
    EqualsField(&'static str),
    /// Value may be empty, otherwise exactly `len` ASCII digits
    OptionalDigits { len: usize },
}

impl Rule {
    /// Evaluate the rule. `other` is the value of the field named by
    /// `EqualsField`; it is ignored by every other rule.
    pub fn check(&self, value: &str, other: Option<&str>) -> Verdict {
        let ok = match self {
            Rule::NonEmpty => non_empty(value),
            Rule::LengthRange { min, max } => length_in_range(value, *min, *max),
            Rule::Email => is_email(value),
            Rule::EqualsField(_) => return values_match(other.unwrap_or_default(), value),
            Rule::OptionalDigits { len } => {
                value.is_empty()
                    || (value.chars().count() == *len && value.chars().all(|c| c.is_ascii_digit()))
            }
        };
        if ok {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Name of the field this rule reads besides its own
    pub fn depends_on(&self) -> Option<&'static str> {
        match self {
            Rule::EqualsField(other) => Some(*other),
            _ => None,
        }
    }

    /// Default message shown when the rule fails
    pub fn message(&self, label: &str) -> String {
        match self {
            Rule::NonEmpty => format!("{label} is required"),
            Rule::LengthRange { min, max } => {
                format!("{label} must be {min}-{max} characters")
            }
            Rule::Email => "Enter a valid email address".to_string(),
            Rule::EqualsField(_) => "Passwords do not match".to_string(),
            Rule::OptionalDigits { len } => format!("{label} must be {len} digits"),
        }
    }
}

/// True iff the trimmed value is not empty
pub fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True iff the value is not blank and its character count is in `min..=max`.
///
/// The count is taken on the raw value, so surrounding spaces count.
pub fn length_in_range(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    non_empty(value) && (min..=max).contains(&len)
}

/// True iff the value is not blank and matches the email shape
pub fn is_email(value: &str) -> bool {
    non_empty(value) && EMAIL_PATTERN.is_match(value)
}

/// Compare a confirmation value against the value it confirms.
///
/// A mismatch fails. Equal values pass only when the confirmation is not
/// blank; equal blank values are `Unresolved`, so an untouched
/// confirmation is not flagged as a mismatch.
pub fn values_match(first: &str, confirm: &str) -> Verdict {
    if confirm != first {
        Verdict::Fail
    } else if non_empty(confirm) {
        Verdict::Pass
    } else {
        Verdict::Unresolved
    }
}
