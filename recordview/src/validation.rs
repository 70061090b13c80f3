//! Validation Support
//!
//! Checks applied to configured list vocabularies (see
//! [`ListSchema::validate`](crate::ListSchema::validate)). The engine itself
//! never rejects input; only configuration loaded at startup is validated.
//!
//! # Example
//!
//! ```rust
//! use recordview::{ColumnSpec, ListSchema};
//!
//! let schema = ListSchema::new("customers")
//!     .column(ColumnSpec::new("Name", "name").sortable())
//!     .column(ColumnSpec::new("Name", "name"));
//!
//! let errors = schema.validate().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use serde::Serialize;
use std::fmt;

/// Validation error with field name and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The configuration field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert to Result
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Helper validators for common patterns
pub mod validators {
    use super::ValidationError;

    pub const MAX_FIELD_NAME_LENGTH: usize = 100;

    /// Field names are plain identifiers: non-empty, bounded, no leading
    /// underscore and no `..` path segments.
    #[must_use]
    pub fn is_valid_field_name(field_name: &str) -> bool {
        !field_name.is_empty()
            && field_name.len() <= MAX_FIELD_NAME_LENGTH
            && !field_name.starts_with('_')
            && !field_name.contains("..")
            && !field_name.chars().any(|c| c.is_whitespace() || c.is_control())
    }

    /// # Errors
    ///
    /// Fails when `value` is not a valid field name.
    pub fn validate_field_name(field: &str, value: &str) -> Result<(), ValidationError> {
        if is_valid_field_name(value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("'{value}' is not a valid field name"),
            ))
        }
    }

    /// # Errors
    ///
    /// Fails when `value` is empty or whitespace.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }
}
