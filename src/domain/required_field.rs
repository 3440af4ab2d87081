//! src/domain/required_field.rs

use crate::domain::ValidationError;

/// A submitted form value that must be present and non-empty.
/// No trimming or format checks are applied, the value is kept as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField(String);

impl RequiredField {
    /// Returns an instance of `RequiredField` if `value` is present and not empty,
    /// a `ValidationError` naming `field` otherwise.
    pub fn parse(field: &'static str, value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            Some(value) if !value.is_empty() => Ok(Self(value)),
            _ => Err(ValidationError::MissingFields(vec![field])),
        }
    }
}

impl AsRef<str> for RequiredField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
