// The HTTP API, served on an ephemeral port and driven with reqwest.

mod test_utils;

use autopx_core::PublishPlatform;
use autopx_error::PublishErrorKind;
use autopx_server::{AppState, serve_on};
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{MockBackend, MockPlatform, studio};

async fn spawn(
    backend: &Arc<MockBackend>,
    facebook: &Arc<MockPlatform>,
    x: &Arc<MockPlatform>,
) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = AppState::new(studio(backend, facebook, x));
    tokio::spawn(async move { serve_on(state, listener).await });
    Ok(format!("http://{}", addr))
}

fn doubles() -> (Arc<MockPlatform>, Arc<MockPlatform>) {
    (
        MockPlatform::succeeding(PublishPlatform::Facebook, "123"),
        MockPlatform::succeeding(PublishPlatform::X, "1445880548472328192"),
    )
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({}));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let body: Value = reqwest::get(format!("{}/health", base)).await?.json().await?;

    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn test_generate_post_for_x_only() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({
        "xPost": "Solar + wind are the cheapest power ever built. #RenewableEnergy",
        "facebookPost": "Not requested"
    }));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/posts/generate", base))
        .json(&json!({"topic": "The future of renewable energy", "platform": "x"}))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({"xPost": "Solar + wind are the cheapest power ever built. #RenewableEnergy"})
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_form_is_bad_request() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({}));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/posts/generate", base))
        .json(&json!({"topic": "Solar", "platform": "myspace"}))
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Invalid input.");
    assert_eq!(body["category"], "invalid_input");
    assert_eq!(body["details"].as_array().map(Vec::len), Some(2));
    assert_eq!(backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({}));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/audio/generate", base))
        .header("content-type", "application/json")
        .body("{\"script\": ")
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["category"], "invalid_input");
    assert_eq!(backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_output_is_bad_gateway() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({"optimizedContent": "x".repeat(281)}));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/posts/optimize", base))
        .json(&json!({"content": "A long post about tides", "platform": "x"}))
        .send()
        .await?;

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({
            "error": "Failed to optimize the post with AI.",
            "category": "malformed_output",
            "details": []
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_publish_x() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({}));
    let (facebook, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/publish/x", base))
        .json(&json!({"text": "Hello X"}))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"success": true, "postId": "1445880548472328192"}));
    assert_eq!(x.texts(), vec!["Hello X"]);
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_is_service_unavailable() -> anyhow::Result<()> {
    let backend = MockBackend::json(json!({}));
    let facebook = MockPlatform::failing(
        PublishPlatform::Facebook,
        PublishErrorKind::ConfigurationMissing(
            "Facebook credentials are not configured in environment variables.".to_string(),
        ),
    );
    let (_, x) = doubles();
    let base = spawn(&backend, &facebook, &x).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/publish/facebook", base))
        .json(&json!({"text": "Hello Facebook"}))
        .send()
        .await?;

    assert_eq!(response.status(), 503);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Failed to publish to Facebook.");
    assert_eq!(body["category"], "configuration_missing");
    Ok(())
}
