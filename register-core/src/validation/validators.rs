//! Field validators for the registration form.
//!
//! Every validator is a pure function of the field's current value and
//! returns `Ok(())` when the value is acceptable. The error's `Display` text is
//! the hint shown next to the field.
//!
//! | Field            | Rule |
//! |------------------|------|
//! | Name             | at least one non-whitespace character |
//! | Email            | `^[^@]+@[^@.]+\.com$` (case-sensitive) |
//! | Activities       | at least one activity counted |
//! | Card number      | 13 to 16 ASCII digits |
//! | Zip              | exactly 5 ASCII digits |
//! | CVV              | exactly 3 ASCII digits |
//! | Expiration       | a non-placeholder option selected |
//!
//! The email rule only admits single-label `.com` domains in lower case. That
//! narrowness is part of the form's published behaviour and is kept as is.
//!
//! # Example
//!
//! ```
//! use register_core::validation::{ValidationError, validate_email, validate_name};
//!
//! assert!(validate_email("a@b.com").is_ok());
//! assert_eq!(validate_email("a@b.org"), Err(ValidationError::MalformedEmail));
//! assert_eq!(validate_name("   "), Err(ValidationError::Whitespace));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::ActivityItem;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@.]+\.com$").expect("email regex must compile"));

// `[0-9]` rather than `\d`: the regex crate's `\d` also admits non-ASCII digits.
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13,16}$").expect("card number regex must compile"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("zip regex must compile"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("cvv regex must compile"));

/// Why a field value was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field cannot be empty")]
    Empty,

    #[error("field cannot be all whitespace")]
    Whitespace,

    #[error("email address must be formatted like name@domain.com")]
    MalformedEmail,

    #[error("select at least one activity")]
    NoActivitySelected,

    #[error("must contain digits only")]
    NotDigits,

    #[error("must be {} digits", describe_digit_range(.min, .max))]
    DigitCount { min: usize, max: usize, actual: usize },

    #[error("select an option")]
    PlaceholderSelected,
}

fn describe_digit_range(
    min: &usize,
    max: &usize,
) -> String {
    if min == max {
        format!("exactly {min}")
    } else {
        format!("between {min} and {max}")
    }
}

/// Result type shared by every validator.
pub type Validation = Result<(), ValidationError>;

pub fn validate_name(value: &str) -> Validation {
    if value.is_empty() {
        Err(ValidationError::Empty)
    } else if value.trim().is_empty() {
        Err(ValidationError::Whitespace)
    } else {
        Ok(())
    }
}

pub fn validate_email(value: &str) -> Validation {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::MalformedEmail)
    }
}

/// Passes when at least one activity is selected and not disabled.
pub fn validate_activities(items: &[ActivityItem]) -> Validation {
    if items.iter().any(ActivityItem::is_counted) {
        Ok(())
    } else {
        Err(ValidationError::NoActivitySelected)
    }
}

pub fn validate_card_number(value: &str) -> Validation {
    validate_digits(value, &CARD_NUMBER_RE, 13, 16)
}

pub fn validate_zip(value: &str) -> Validation {
    validate_digits(value, &ZIP_RE, 5, 5)
}

pub fn validate_cvv(value: &str) -> Validation {
    validate_digits(value, &CVV_RE, 3, 3)
}

/// Passes when a select holds anything but its prompt option. The option
/// itself is not range-checked: a select only offers valid entries, and the
/// script reader refuses months outside 1 to 12.
pub fn validate_selected<T>(choice: Option<&T>) -> Validation {
    match choice {
        Some(_) => Ok(()),
        None => Err(ValidationError::PlaceholderSelected),
    }
}

/// Matches `value` against a digits-only pattern and, on failure, tells a
/// wrong length apart from stray characters.
fn validate_digits(
    value: &str,
    pattern: &Regex,
    min: usize,
    max: usize,
) -> Validation {
    if pattern.is_match(value) {
        return Ok(());
    }

    if value.chars().all(|c| c.is_ascii_digit()) {
        Err(ValidationError::DigitCount {
            min,
            max,
            actual: value.len(),
        })
    } else {
        Err(ValidationError::NotDigits)
    }
}
