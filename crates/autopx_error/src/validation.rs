//! Boundary validation error types.

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}: {}", field, reason)]
pub struct FieldViolation {
    /// Wire name of the field that failed validation
    pub field: String,
    /// Reason for failure, phrased for the person who filled in the form
    pub reason: String,
}

impl FieldViolation {
    /// Create a new field violation.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Input rejected before any external call was made.
///
/// # Examples
///
/// ```
/// use autopx_error::{FieldViolation, ValidationError};
///
/// let err = ValidationError::new(vec![
///     FieldViolation::new("topic", "Topic must be at least 10 characters long."),
/// ]);
/// assert_eq!(err.violations.len(), 1);
/// assert!(format!("{}", err).contains("topic"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invalid input ({}) at line {} in {}", summary(violations), line, file)]
pub struct ValidationError {
    /// Every field that failed, in declaration order
    pub violations: Vec<FieldViolation>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    #[track_caller]
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            violations,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a single rejected field.
    #[track_caller]
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(field, reason)])
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for boundary validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
