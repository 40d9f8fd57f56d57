//! Generation error types.

use crate::{ErrorCategory, ValidationError};

/// Specific failure conditions of a single template invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Template input failed its schema
    #[display("Invalid template input: {}", _0)]
    InvalidInput(String),
    /// The backend call failed, timed out or returned a non-success status
    #[display("Generation backend unavailable: {}", _0)]
    BackendUnavailable(String),
    /// The backend responded, but the output violated the template's contract
    #[display("Malformed generation output: {}", _0)]
    MalformedOutput(String),
}

impl GenerationErrorKind {
    /// Taxonomy bucket for this condition.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::BackendUnavailable(_) => ErrorCategory::BackendUnavailable,
            Self::MalformedOutput(_) => ErrorCategory::MalformedOutput,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use autopx_error::{ErrorCategory, GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MalformedOutput(
///     "missing field `xPost`".to_string(),
/// ));
/// assert_eq!(err.category(), ErrorCategory::MalformedOutput);
/// assert!(format!("{}", err).contains("xPost"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`GenerationErrorKind::MalformedOutput`].
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::MalformedOutput(message.into()))
    }

    /// Shorthand for [`GenerationErrorKind::BackendUnavailable`].
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::BackendUnavailable(message.into()))
    }

    /// Taxonomy bucket for this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl From<ValidationError> for GenerationError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        let reasons = err
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(GenerationErrorKind::InvalidInput(reasons))
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
