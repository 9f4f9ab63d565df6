//! Schema error types for content validation
//!
//! Error codes:
//! - FOLIO_SCHEMA_TYPE_ERROR (value could not be coerced to the declared type)
//! - FOLIO_SCHEMA_RANGE_ERROR (length or format constraint violated)
//! - FOLIO_SCHEMA_ORDER_ERROR (cross-field date ordering violated)
//!
//! All of these are authoring diagnostics. They never reach site visitors.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Coercion failure or missing required field
    SchemaTypeError,
    /// Length/range violation
    SchemaRangeError,
    /// Later date precedes earlier date
    SchemaOrderError,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SchemaTypeError => "FOLIO_SCHEMA_TYPE_ERROR",
            SchemaErrorCode::SchemaRangeError => "FOLIO_SCHEMA_RANGE_ERROR",
            SchemaErrorCode::SchemaOrderError => "FOLIO_SCHEMA_ORDER_ERROR",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single field failure: where it happened and what was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path (e.g. "end", "tags[2]")
    pub field: String,
    pub code: SchemaErrorCode,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(code: SchemaErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::SchemaTypeError, field, "Required")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            SchemaErrorCode::SchemaTypeError,
            field,
            format!("Expected {}, received {}", expected, actual),
        )
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        Self::new(
            SchemaErrorCode::SchemaRangeError,
            field,
            format!("String must contain at least {} character(s)", min),
        )
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        Self::new(
            SchemaErrorCode::SchemaRangeError,
            field,
            format!("String must contain at most {} character(s)", max),
        )
    }

    pub fn out_of_order(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::SchemaOrderError, field, message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// All field errors produced by validating one record.
///
/// A report is never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the first error recorded against `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Returns whether any error for `field` has been recorded
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }

    /// `(fieldPath, message)` pairs in the order they were found
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for err in &self.errors {
            write!(f, "; {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl IntoIterator for ValidationReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Result type for schema validation
pub type SchemaResult<T> = Result<T, ValidationReport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::SchemaTypeError.code(), "FOLIO_SCHEMA_TYPE_ERROR");
        assert_eq!(SchemaErrorCode::SchemaRangeError.code(), "FOLIO_SCHEMA_RANGE_ERROR");
        assert_eq!(SchemaErrorCode::SchemaOrderError.code(), "FOLIO_SCHEMA_ORDER_ERROR");
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::type_mismatch("start", "date", "bool");
        let display = format!("{}", err);
        assert!(display.contains("FOLIO_SCHEMA_TYPE_ERROR"));
        assert!(display.contains("start"));
        assert!(display.contains("date"));
    }

    #[test]
    fn test_report_lookup_and_pairs() {
        let mut report = ValidationReport::new();
        assert!(report.is_empty());

        report.push(FieldError::too_short("title", 5));
        report.push(FieldError::required("start"));

        assert_eq!(report.len(), 2);
        assert!(report.has_field("title"));
        assert!(!report.has_field("end"));
        assert_eq!(report.for_field("start").unwrap().message, "Required");
        assert_eq!(report.pairs()[0].0, "title");
    }

    #[test]
    fn test_report_display_lists_every_error() {
        let mut report = ValidationReport::new();
        report.push(FieldError::too_long("subTitle", 100));
        report.push(FieldError::out_of_order("end", "End date cannot be earlier than start date."));

        let display = report.to_string();
        assert!(display.starts_with("2 validation error(s)"));
        assert!(display.contains("subTitle"));
        assert!(display.contains("FOLIO_SCHEMA_ORDER_ERROR"));
    }
}
