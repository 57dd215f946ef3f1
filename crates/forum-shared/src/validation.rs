//! Field-level input validation.
//!
//! Request shapes implement [`Validate`], turning themselves into domain values
//! or reporting every failing field at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use forum_core::domain::Role;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// One failing field and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

/// Check an input shape and convert it into its domain counterpart.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

/// Accumulates failures across fields.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Length in characters, both bounds inclusive.
    pub(crate) fn length(&mut self, field: &str, value: &str, min: usize, max: Option<usize>) {
        let len = value.chars().count();
        if len < min {
            self.fail(
                field,
                format!("ensure this value has at least {min} characters"),
            );
        } else if let Some(max) = max.filter(|max| len > *max) {
            self.fail(
                field,
                format!("ensure this value has at most {max} characters"),
            );
        }
    }

    pub(crate) fn email(&mut self, field: &str, value: &str) {
        if !EMAIL_RE.is_match(value) {
            self.fail(field, "value is not a valid email address");
        } else {
            self.length(field, value, 1, Some(255));
        }
    }

    pub(crate) fn role(&mut self, field: &str, value: &str) -> Option<Role> {
        match value.parse() {
            Ok(role) => Some(role),
            Err(_) => {
                self.fail(
                    field,
                    "value is not a valid enumeration member; permitted: 'user', 'admin'",
                );
                None
            }
        }
    }

    pub(crate) fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Build the output only if no field failed.
    pub(crate) fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
