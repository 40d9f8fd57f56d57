//! JSON encoding errors outside the generation path.

/// A value could not be rendered as JSON.
///
/// # Examples
///
/// ```
/// use autopx_error::JsonError;
///
/// let err = JsonError::new("command output", "key must be a string");
/// assert_eq!(err.subject, "command output");
/// assert!(err.to_string().starts_with("JSON Error: could not encode command output"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: could not encode {}: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// What was being encoded
    pub subject: &'static str,
    /// The encoder's message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record an encoding failure for `subject` at the current location.
    #[track_caller]
    pub fn new(subject: &'static str, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
