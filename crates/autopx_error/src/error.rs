//! Top-level error wrapper types.

use crate::{
    ConfigError, ErrorCategory, GenerationError, HttpError, JsonError, PublishError,
    ValidationError,
};

/// Every error the autopx crates can produce.
///
/// # Examples
///
/// ```
/// use autopx_error::{AutopxError, ConfigError};
///
/// let err: AutopxError = ConfigError::new("missing [server] section").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AutopxErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Boundary validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Template invocation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Platform publishing error
    #[from(PublishError)]
    Publish(PublishError),
}

impl AutopxErrorKind {
    /// Taxonomy bucket for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) => ErrorCategory::BackendUnavailable,
            Self::Json(_) => ErrorCategory::MalformedOutput,
            Self::Config(_) => ErrorCategory::ConfigurationMissing,
            Self::Validation(_) => ErrorCategory::InvalidInput,
            Self::Generation(e) => e.category(),
            Self::Publish(e) => e.category(),
        }
    }
}

/// autopx error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("autopx Error: {}", _0)]
pub struct AutopxError(Box<AutopxErrorKind>);

impl AutopxError {
    /// Create a new error from a kind.
    pub fn new(kind: AutopxErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AutopxErrorKind {
        &self.0
    }

    /// Taxonomy bucket for this error.
    pub fn category(&self) -> ErrorCategory {
        self.0.category()
    }
}

// Generic From implementation for any type that converts to AutopxErrorKind
impl<T> From<T> for AutopxError
where
    T: Into<AutopxErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for autopx operations.
pub type AutopxResult<T> = std::result::Result<T, AutopxError>;
