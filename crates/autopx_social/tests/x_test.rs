// XPlatform with injected clients, and XClient against a local fake X API.

use async_trait::async_trait;
use autopx_error::{ErrorCategory, PublishError, PublishErrorKind, PublishResult};
use autopx_interface::SocialPlatform;
use autopx_social::{CreatedPost, XApi, XClient, XCredentials, XPlatform};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

struct FailingXApi;

#[async_trait]
impl XApi for FailingXApi {
    async fn create_post(&self, _text: &str) -> PublishResult<CreatedPost> {
        Err(PublishError::new(PublishErrorKind::Unavailable(
            "connection reset by peer".to_string(),
        )))
    }
}

struct EchoXApi;

#[async_trait]
impl XApi for EchoXApi {
    async fn create_post(&self, text: &str) -> PublishResult<CreatedPost> {
        Ok(CreatedPost {
            id: "1445880548472328192".to_string(),
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
struct TweetCall {
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeX {
    status: StatusCode,
    response: Value,
    calls: Arc<Mutex<Vec<TweetCall>>>,
}

impl FakeX {
    fn new(status: StatusCode, response: Value) -> Self {
        Self {
            status,
            response,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<TweetCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn tweets(
    State(fake): State<FakeX>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push(TweetCall {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (fake.status, Json(fake.response.clone()))
}

async fn spawn(fake: FakeX) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/2/tweets", post(tweets))
        .with_state(fake);
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(format!("http://{}", addr))
}

fn full_credentials() -> XCredentials {
    XCredentials::new(
        Some("consumer-key".to_string()),
        Some("consumer-secret".to_string()),
        Some("access-token".to_string()),
        Some("access-secret".to_string()),
    )
}

#[tokio::test]
async fn test_failing_client_yields_failed_outcome() -> anyhow::Result<()> {
    let x = XPlatform::new(Arc::new(FailingXApi));

    let outcome = x.publish("Hello X").await;

    assert!(!outcome.success());
    assert!(outcome.post_id().is_none());
    assert!(!outcome.error().as_deref().unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_successful_client_yields_post_id() -> anyhow::Result<()> {
    let x = XPlatform::new(Arc::new(EchoXApi));

    let outcome = x.publish("Hello X").await;

    assert_eq!(
        serde_json::to_value(&outcome)?,
        json!({"success": true, "postId": "1445880548472328192"})
    );
    Ok(())
}

#[tokio::test]
async fn test_client_signs_and_posts_json() -> anyhow::Result<()> {
    let fake = FakeX::new(
        StatusCode::CREATED,
        json!({"data": {"id": "1445880548472328192", "text": "Hello X"}}),
    );
    let api_url = spawn(fake.clone()).await?;
    let client = XClient::new(full_credentials(), api_url)?;

    let created = client.create_post("Hello X").await?;

    assert_eq!(created.id, "1445880548472328192");
    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({"text": "Hello X"}));
    let authorization = calls[0].authorization.clone().unwrap_or_default();
    assert!(authorization.starts_with("OAuth "));
    assert!(authorization.contains("oauth_consumer_key=\"consumer-key\""));
    assert!(authorization.contains("oauth_token=\"access-token\""));
    assert!(authorization.contains("oauth_signature=\""));
    assert!(!authorization.contains("consumer-secret"));
    Ok(())
}

#[tokio::test]
async fn test_incomplete_credentials_make_no_request() -> anyhow::Result<()> {
    let fake = FakeX::new(StatusCode::CREATED, json!({}));
    let api_url = spawn(fake.clone()).await?;
    let credentials = XCredentials::new(Some("consumer-key".to_string()), None, None, None);
    let x = XPlatform::new(Arc::new(XClient::new(credentials, api_url)?));

    let err = x.try_publish("Hello X").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ConfigurationMissing);
    assert!(fake.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rejection_carries_status_and_detail() -> anyhow::Result<()> {
    let fake = FakeX::new(
        StatusCode::FORBIDDEN,
        json!({
            "title": "Forbidden",
            "detail": "You are not allowed to create a Tweet with duplicate content.",
            "type": "about:blank",
            "status": 403
        }),
    );
    let api_url = spawn(fake).await?;
    let x = XPlatform::new(Arc::new(XClient::new(full_credentials(), api_url)?));

    let outcome = x.publish("Hello X").await;

    assert!(!outcome.success());
    let error = outcome.error().clone().unwrap_or_default();
    assert!(error.contains("403"));
    assert!(error.contains("duplicate content"));
    Ok(())
}
