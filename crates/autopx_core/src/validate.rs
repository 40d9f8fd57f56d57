//! Boundary validation.

use autopx_error::{FieldViolation, ValidationError, ValidationResult};

/// Types that can check their own field constraints before any external call.
pub trait Validate {
    /// Validate every field, reporting all violations at once.
    fn validate(&self) -> ValidationResult<()>;
}

/// Accumulates field violations.
///
/// # Examples
///
/// ```
/// use autopx_core::Violations;
///
/// let mut violations = Violations::default();
/// violations
///     .length("topic", "solar", 10, 200)
///     .not_blank("tone", "Casual");
///
/// let err = violations.finish().unwrap_err();
/// assert_eq!(err.violations.len(), 1);
/// assert_eq!(err.violations[0].field, "topic");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Record a violation.
    pub fn push(&mut self, field: &str, reason: impl Into<String>) -> &mut Self {
        self.0.push(FieldViolation::new(field, reason));
        self
    }

    /// Require non-whitespace content.
    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, format!("{} must not be empty.", display_name(field)));
        }
        self
    }

    /// Require between `min` and `max` characters (inclusive).
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let count = value.chars().count();
        if count < min {
            self.push(
                field,
                format!("{} must be at least {} characters long.", display_name(field), min),
            );
        } else if count > max {
            self.push(
                field,
                format!("{} must be at most {} characters long.", display_name(field), max),
            );
        }
        self
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a result.
    #[track_caller]
    pub fn finish(self) -> ValidationResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.0))
        }
    }
}

// "postContent" -> "Post content"
fn display_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len() + 2);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            name.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            name.push(' ');
            name.extend(c.to_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut violations = Violations::default();
        violations.length("topic", "énergie—é", 9, 9);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_reasons_use_readable_field_names() {
        let mut violations = Violations::default();
        violations.not_blank("postContent", "   ");
        let err = violations.finish().unwrap_err();
        assert_eq!(err.violations[0].reason, "Post content must not be empty.");
    }

    #[test]
    fn test_upper_bound() {
        let mut violations = Violations::default();
        violations.length("topic", &"a".repeat(201), 10, 200);
        let err = violations.finish().unwrap_err();
        assert_eq!(
            err.violations[0].reason,
            "Topic must be at most 200 characters long."
        );
    }
}
