//! Trait definitions for generation backends and publishing platforms.

use async_trait::async_trait;
use autopx_core::{GenerateRequest, GenerateResponse, PostId, PublishOutcome, PublishPlatform};
use autopx_error::{GenerationResult, PublishResult};

/// Core trait that every hosted model backend implements.
///
/// One call is one request to the provider: implementations never retry or cache.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate model output for a rendered prompt.
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` for transport failures and non-success statuses, and
    /// `MalformedOutput` when the provider's response cannot be read.
    async fn generate(&self, req: &GenerateRequest) -> GenerationResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;

    /// Model that will serve `req`: its override if set, otherwise the backend's default.
    fn model_for<'a>(&'a self, req: &'a GenerateRequest) -> &'a str {
        req.model.as_deref().unwrap_or_else(|| self.model_name())
    }
}

/// Trait for social media platform adapters.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// Which platform this adapter publishes to.
    fn platform(&self) -> PublishPlatform;

    /// Publish text immediately.
    ///
    /// # Returns
    ///
    /// Platform-specific post ID on success.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Credentials are not configured
    /// - The platform rejects the post
    /// - The request cannot be completed
    async fn try_publish(&self, text: &str) -> PublishResult<PostId>;

    /// Publish text, reporting failure in the outcome instead of as an error.
    async fn publish(&self, text: &str) -> PublishOutcome {
        match self.try_publish(text).await {
            Ok(post_id) => {
                tracing::info!(platform = %self.platform(), %post_id, "Post published");
                PublishOutcome::published(post_id)
            }
            Err(e) => {
                tracing::error!(
                    platform = %self.platform(),
                    category = %e.category(),
                    error = %e,
                    "Publishing failed"
                );
                PublishOutcome::failed(e.kind.to_string())
            }
        }
    }
}
