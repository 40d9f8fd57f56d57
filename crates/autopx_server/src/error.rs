//! Errors surfaced by the action layer.

use autopx_error::{ErrorCategory, GenerationError, GenerationErrorKind, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// User-triggered operations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    /// Draft posts for one or both platforms
    GeneratePost,
    /// Build a universal content package
    GeneratePackage,
    /// Narrate a script
    GenerateAudio,
    /// Rewrite a post in another tone
    AdjustTone,
    /// Optimise a post for one platform
    Optimize,
    /// Suggest titles for a post
    GenerateTitles,
    /// Append suggested hashtags to a post
    SuggestHashtags,
    /// Publish to the Facebook Page
    PublishFacebook,
    /// Publish to X
    PublishX,
}

impl Operation {
    /// Message shown when a downstream call behind this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::GeneratePost => "Failed to generate post with AI.",
            Self::GeneratePackage => "Failed to generate content package with AI.",
            Self::GenerateAudio => "Failed to generate audio with AI.",
            Self::AdjustTone => "Failed to adjust the post tone with AI.",
            Self::Optimize => "Failed to optimize the post with AI.",
            Self::GenerateTitles => "Failed to generate titles with AI.",
            Self::SuggestHashtags => "Could not suggest hashtags.",
            Self::PublishFacebook => "Failed to publish to Facebook.",
            Self::PublishX => "Failed to publish to X.",
        }
    }
}

/// The only error presentation surfaces see.
///
/// `details` only ever describes the caller's own input; downstream failures carry the category
/// alone and are logged in full where they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    operation: Operation,
    category: ErrorCategory,
    details: Vec<String>,
}

impl ActionError {
    /// Input rejected at the boundary.
    pub fn invalid(operation: Operation, err: ValidationError) -> Self {
        Self {
            operation,
            category: ErrorCategory::InvalidInput,
            details: err.violations.iter().map(ToString::to_string).collect(),
        }
    }

    /// Request body that could not be decoded at all.
    pub fn unreadable(operation: Operation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            category: ErrorCategory::InvalidInput,
            details: vec![reason.into()],
        }
    }

    /// A downstream call failed.
    pub fn downstream(operation: Operation, category: ErrorCategory) -> Self {
        Self {
            operation,
            category,
            details: Vec::new(),
        }
    }

    /// Classify an orchestrator failure.
    pub fn from_generation(operation: Operation, err: &GenerationError) -> Self {
        match &err.kind {
            GenerationErrorKind::InvalidInput(reasons) => Self {
                operation,
                category: ErrorCategory::InvalidInput,
                details: reasons.split("; ").map(str::to_string).collect(),
            },
            _ => Self::downstream(operation, err.category()),
        }
    }

    /// Operation that failed.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Taxonomy bucket.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Per-field reasons for invalid input.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self.category {
            ErrorCategory::InvalidInput => "Invalid input.",
            _ => self.operation.failure_message(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self.category {
            ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCategory::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::BackendUnavailable
            | ErrorCategory::MalformedOutput
            | ErrorCategory::RemoteRejected => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())?;
        if !self.details.is_empty() {
            write!(f, " {}", self.details.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ActionError {}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message(),
            "category": self.category.as_str(),
            "details": self.details,
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Result type for actions.
pub type ActionResult<T> = std::result::Result<T, ActionError>;
