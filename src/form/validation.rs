//! Field validation rules

use super::field::{FieldKind, FormField};
use crate::config::FormConfig;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Why a field was rejected. `Display` is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Minimum {0} characters required")]
    BelowMinLength(usize),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least {0} characters")]
    MessageTooShort(usize),
    #[error("Please enter at least {0} characters")]
    TextTooShort(usize),
}

/// Default length rules for fields without `minlength`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub text_min_length: usize,
    pub multiline_min_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            text_min_length: 2,
            multiline_min_length: 10,
        }
    }
}

impl From<&FormConfig> for ValidationRules {
    fn from(config: &FormConfig) -> Self {
        Self {
            text_min_length: config.text_min_length,
            multiline_min_length: config.multiline_min_length,
        }
    }
}

/// `local@domain.tld` shape, no whitespace anywhere
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Check one field against its rules.
///
/// An explicit `minlength` is checked first and replaces the kind's default
/// length requirement. Email fields must still match the address shape.
pub fn validate(field: &FormField, rules: &ValidationRules) -> Result<(), ValidationError> {
    let trimmed = field.value.trim();
    let len = field.trimmed_len();

    if let Some(min) = field.min_length {
        if len < min {
            return Err(ValidationError::BelowMinLength(min));
        }
    }

    let default_length_applies = field.min_length.is_none();
    match field.kind {
        FieldKind::Email if !is_email(trimmed) => Err(ValidationError::InvalidEmail),
        FieldKind::Multiline if default_length_applies && len < rules.multiline_min_length => {
            Err(ValidationError::MessageTooShort(rules.multiline_min_length))
        }
        FieldKind::Text if default_length_applies && len < rules.text_min_length => {
            Err(ValidationError::TextTooShort(rules.text_min_length))
        }
        _ => Ok(()),
    }
}
