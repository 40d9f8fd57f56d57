//! Publish outcome types.

use serde::{Deserialize, Serialize};

/// Identifier a platform assigned to a created post.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Create a post id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Result of a publish attempt, as reported to the caller.
///
/// Exactly one of `post_id` and `error` is present.
///
/// # Examples
///
/// ```
/// use autopx_core::{PostId, PublishOutcome};
///
/// let ok = PublishOutcome::published(PostId::new("123"));
/// assert!(ok.success());
/// assert_eq!(
///     serde_json::to_value(&ok).unwrap(),
///     serde_json::json!({"success": true, "postId": "123"})
/// );
///
/// let failed = PublishOutcome::failed("Facebook credentials are not configured in environment variables.");
/// assert!(!failed.success());
/// assert!(failed.post_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    /// Whether the platform accepted the post
    #[getter(skip)]
    success: bool,
    /// Platform identifier of the created post
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post_id: Option<PostId>,
    /// Descriptive failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PublishOutcome {
    /// A successful publish.
    pub fn published(post_id: PostId) -> Self {
        Self {
            success: true,
            post_id: Some(post_id),
            error: None,
        }
    }

    /// A failed publish. Empty messages are replaced so the error is always descriptive.
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "Unknown publishing error".to_string()
        } else {
            error
        };
        Self {
            success: false,
            post_id: None,
            error: Some(error),
        }
    }

    /// Whether the platform accepted the post.
    pub fn success(&self) -> bool {
        self.success
    }
}
