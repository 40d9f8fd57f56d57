//! Facebook Pages adapter (Graph API).

use crate::{FacebookCredentials, PublishMetrics};
use async_trait::async_trait;
use autopx_core::{PostId, PublishPlatform};
use autopx_error::{AutopxResult, HttpError, PublishError, PublishErrorKind, PublishResult};
use autopx_interface::SocialPlatform;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, instrument};

/// Default Graph API root.
pub const GRAPH_API_URL: &str = "https://graph.facebook.com";

/// Publishes text to a Facebook Page feed.
#[derive(Debug, Clone)]
pub struct FacebookPlatform {
    client: Client,
    credentials: FacebookCredentials,
    graph_url: String,
}

impl FacebookPlatform {
    /// Create the adapter. Missing credentials are not an error here; each call checks them.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(
        credentials: FacebookCredentials,
        graph_url: impl Into<String>,
    ) -> AutopxResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("autopx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            credentials,
            graph_url: graph_url.into(),
        })
    }

    /// The credentials this adapter was built with.
    pub fn credentials(&self) -> &FacebookCredentials {
        &self.credentials
    }

    async fn post_to_feed(&self, text: &str) -> PublishResult<PostId> {
        let (page_id, access_token) = self.credentials.require()?;
        let url = format!("{}/{}/feed", self.graph_url.trim_end_matches('/'), page_id);
        debug!(url = %url, "Posting to Facebook Page feed");

        let response = self
            .client
            .post(&url)
            .form(&[("message", text), ("access_token", access_token)])
            .send()
            .await
            .map_err(exception)?;
        let status = response.status();
        let body = response.text().await.map_err(exception)?;
        let json: Option<Value> = serde_json::from_str(&body).ok();

        if let Some(error) = json.as_ref().and_then(|v| v.get("error")) {
            return Err(rejected(
                status.as_u16(),
                format!(
                    "Failed to post to Facebook. Code: {}, Type: {}, Message: {}",
                    field(error, "code"),
                    field(error, "type"),
                    field(error, "message")
                ),
            ));
        }

        if !status.is_success() {
            return Err(rejected(
                status.as_u16(),
                format!(
                    "Failed to post to Facebook. Status: {}, Body: {}",
                    status.as_u16(),
                    body
                ),
            ));
        }

        let Some(json) = json else {
            return Err(PublishError::new(PublishErrorKind::Unavailable(
                "An exception occurred while trying to post to Facebook: response body is not JSON"
                    .to_string(),
            )));
        };

        match json.get("id").and_then(Value::as_str) {
            Some(id) => Ok(PostId::new(id)),
            None => Err(rejected(
                status.as_u16(),
                format!(
                    "Failed to post to Facebook. Status: {}, Body: {}",
                    status.as_u16(),
                    body
                ),
            )),
        }
    }
}

fn exception(e: reqwest::Error) -> PublishError {
    PublishError::new(PublishErrorKind::Unavailable(format!(
        "An exception occurred while trying to post to Facebook: {}",
        e
    )))
}

fn rejected(status: u16, message: String) -> PublishError {
    PublishError::new(PublishErrorKind::RemoteRejected { status, message })
}

fn field(error: &Value, key: &str) -> String {
    match error.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl SocialPlatform for FacebookPlatform {
    fn platform(&self) -> PublishPlatform {
        PublishPlatform::Facebook
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn try_publish(&self, text: &str) -> PublishResult<PostId> {
        let started = Instant::now();
        let result = self.post_to_feed(text).await;
        PublishMetrics::get().record(
            PublishPlatform::Facebook,
            started.elapsed().as_secs_f64(),
            result.as_ref().err().map(PublishError::category),
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_renders_numbers_and_strings() {
        let error = json!({"code": 190, "type": "OAuthException"});
        assert_eq!(field(&error, "code"), "190");
        assert_eq!(field(&error, "type"), "OAuthException");
        assert_eq!(field(&error, "message"), "unknown");
    }
}
