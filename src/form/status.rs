//! Status messages shown under the form

use std::time::Duration;

pub const SENT: &str = "Thank you! Your message has been sent successfully.";
pub const SPAM_ABSORBED: &str = "Form submitted successfully!";
pub const CORRECT_ERRORS: &str = "Please correct the errors below.";
pub const SUBMIT_FAILED: &str = "Unable to submit form.";
pub const FALLBACK_LABEL: &str = "Send email directly";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// BEM modifier used by the stylesheet (`cf-status--success`)
    pub fn modifier(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// Manual escape hatch rendered after a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoFallback {
    pub address: String,
    pub label: String,
}

impl MailtoFallback {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            label: FALLBACK_LABEL.to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("mailto:{}", self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub fallback: Option<MailtoFallback>,
    /// When the message clears itself; `None` keeps it until replaced
    pub expires_at: Option<Duration>,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>, expires_at: Duration) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
            fallback: None,
            expires_at: Some(expires_at),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
            fallback: None,
            expires_at: None,
        }
    }

    pub fn with_fallback(mut self, fallback: MailtoFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}
