//! Publishing error types.

use crate::ErrorCategory;

/// Specific failure conditions of a publish call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// A required credential was not configured
    #[display("{}", _0)]
    ConfigurationMissing(String),
    /// The platform answered with an error status or error body
    #[display("{}", message)]
    RemoteRejected {
        /// HTTP status returned by the platform
        status: u16,
        /// Human-readable description assembled from the platform's error body
        message: String,
    },
    /// The request could not be completed (DNS, TLS, connection reset, unreadable body)
    #[display("{}", _0)]
    Unavailable(String),
}

impl PublishErrorKind {
    /// Taxonomy bucket for this condition.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationMissing(_) => ErrorCategory::ConfigurationMissing,
            Self::RemoteRejected { .. } => ErrorCategory::RemoteRejected,
            Self::Unavailable(_) => ErrorCategory::BackendUnavailable,
        }
    }
}

/// Publish error with location tracking.
///
/// The kind's `Display` is the descriptive message reported back in a failed publish outcome,
/// so it carries no location noise; the location lives on the wrapper.
///
/// # Examples
///
/// ```
/// use autopx_error::{ErrorCategory, PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::RemoteRejected {
///     status: 400,
///     message: "Failed to post to Facebook. Code: 100".to_string(),
/// });
/// assert_eq!(err.category(), ErrorCategory::RemoteRejected);
/// assert_eq!(err.kind.to_string(), "Failed to post to Facebook. Code: 100");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish error: {} at {}:{}", kind, file, line)]
pub struct PublishError {
    /// Error kind.
    pub kind: PublishErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// File where error occurred.
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Taxonomy bucket for this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Result type for platform operations.
pub type PublishResult<T> = std::result::Result<T, PublishError>;
