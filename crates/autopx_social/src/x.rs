//! X adapter (API v2, OAuth 1.0a user context).

use crate::{PublishMetrics, XCredentials, oauth};
use async_trait::async_trait;
use autopx_core::{PostId, PublishPlatform};
use autopx_error::{AutopxResult, HttpError, PublishError, PublishErrorKind, PublishResult};
use autopx_interface::SocialPlatform;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Default X API root.
pub const X_API_URL: &str = "https://api.twitter.com";

/// A post created on X.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    /// Post identifier
    pub id: String,
    /// Text as stored by X
    pub text: String,
}

/// The slice of the X API the studio needs.
///
/// Injected into [`XPlatform`] so tests and alternative transports can stand in for the real
/// client.
#[async_trait]
pub trait XApi: Send + Sync {
    /// Create a post with the given text.
    async fn create_post(&self, text: &str) -> PublishResult<CreatedPost>;
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

/// Real X API v2 client.
#[derive(Debug, Clone)]
pub struct XClient {
    client: Client,
    credentials: XCredentials,
    api_url: String,
}

impl XClient {
    /// Create the client. Incomplete credentials produce a warning, not an error; calls fail
    /// with `ConfigurationMissing` until they are supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(credentials: XCredentials, api_url: impl Into<String>) -> AutopxResult<Self> {
        let missing = credentials.missing();
        if !missing.is_empty() {
            warn!(
                missing = %missing.join(", "),
                "X API credentials are not fully configured. Posting to X will not work."
            );
        }

        let client = Client::builder()
            .user_agent(concat!("autopx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            credentials,
            api_url: api_url.into(),
        })
    }
}

fn unavailable(message: String) -> PublishError {
    PublishError::new(PublishErrorKind::Unavailable(message))
}

/// Human-readable summary of an X error body.
fn describe_error(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let mut parts: Vec<String> = ["title", "detail"]
        .iter()
        .filter_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    if let Some(errors) = json.get("errors").and_then(Value::as_array) {
        parts.extend(
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .map(str::to_string),
        );
    }
    (!parts.is_empty()).then(|| parts.join(": "))
}

#[async_trait]
impl XApi for XClient {
    #[instrument(skip(self, text))]
    async fn create_post(&self, text: &str) -> PublishResult<CreatedPost> {
        let signer = self.credentials.signer()?;
        let url = format!("{}/2/tweets", self.api_url.trim_end_matches('/'));
        let authorization =
            signer.authorization_header("POST", &url, &[], &oauth::nonce(), &oauth::timestamp())?;
        debug!(url = %url, "Creating post on X");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| unavailable(format!("Failed to post to X: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| unavailable(format!("Failed to read X response: {}", e)))?;

        if !status.is_success() {
            let message = match describe_error(&body) {
                Some(details) => format!(
                    "Failed to post to X. Status: {}, {}",
                    status.as_u16(),
                    details
                ),
                None => format!(
                    "Failed to post to X. Status: {}, Body: {}",
                    status.as_u16(),
                    body
                ),
            };
            return Err(PublishError::new(PublishErrorKind::RemoteRejected {
                status: status.as_u16(),
                message,
            }));
        }

        let created: CreatePostResponse = serde_json::from_str(&body)
            .map_err(|e| unavailable(format!("Unexpected response from X: {}", e)))?;
        info!("Tweet {}: {}", created.data.id, created.data.text);
        Ok(created.data)
    }
}

/// Publishes text to X through an injected [`XApi`].
#[derive(Clone)]
pub struct XPlatform {
    api: Arc<dyn XApi>,
}

impl XPlatform {
    /// Create the adapter.
    pub fn new(api: Arc<dyn XApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for XPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XPlatform").finish_non_exhaustive()
    }
}

#[async_trait]
impl SocialPlatform for XPlatform {
    fn platform(&self) -> PublishPlatform {
        PublishPlatform::X
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn try_publish(&self, text: &str) -> PublishResult<PostId> {
        let started = Instant::now();
        let result = self
            .api
            .create_post(text)
            .await
            .map(|post| PostId::new(post.id));
        PublishMetrics::get().record(
            PublishPlatform::X,
            started.elapsed().as_secs_f64(),
            result.as_ref().err().map(PublishError::category),
        );
        result
    }
}
