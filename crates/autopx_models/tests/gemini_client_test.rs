// GeminiClient against a local fake of the generateContent endpoint.

use autopx_core::{GenerateRequest, Output, ResponseFormat};
use autopx_error::ErrorCategory;
use autopx_interface::GenerationBackend;
use autopx_models::{GeminiClient, GeminiConfig};
use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Seen {
    call: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeGemini {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(call): Path<String>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    fake.seen.lock().unwrap().push(Seen {
        call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (
        fake.status,
        [(header::CONTENT_TYPE, "application/json")],
        fake.body.clone(),
    )
}

async fn spawn(fake: FakeGemini) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/v1beta/models/:call", post(generate_content))
        .with_state(fake);
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(format!("http://{}", addr))
}

fn client(base_url: &str) -> anyhow::Result<GeminiClient> {
    let config = GeminiConfig::default().with_base_url(base_url);
    Ok(GeminiClient::with_api_key("fake-key", config)?)
}

#[tokio::test]
async fn test_structured_generation_round_trip() -> anyhow::Result<()> {
    let fake = FakeGemini::new(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"facebookPost\": \"Hello Facebook\"}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7, "totalTokenCount": 19}
        })
        .to_string(),
    );
    let base_url = spawn(fake.clone()).await?;
    let client = client(&base_url)?;

    let schema = json!({"type": "OBJECT", "properties": {"facebookPost": {"type": "STRING"}}});
    let request = GenerateRequest::new("Write a post", ResponseFormat::Json { schema });
    let response = client.generate(&request).await?;

    assert_eq!(
        response.json(),
        Some(&json!({"facebookPost": "Hello Facebook"}))
    );
    assert_eq!(response.usage.map(|u| u.prompt_tokens), Some(12));

    let seen = fake.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].call, "gemini-2.0-flash:generateContent");
    assert_eq!(seen[0].api_key.as_deref(), Some("fake-key"));
    assert_eq!(
        seen[0].body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    Ok(())
}

#[tokio::test]
async fn test_speech_returns_decoded_audio() -> anyhow::Result<()> {
    // "AAECAw==" is base64 for [0, 1, 2, 3]
    let fake = FakeGemini::new(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {"parts": [{"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAECAw=="}}]},
                "finishReason": "STOP"
            }]
        })
        .to_string(),
    );
    let base_url = spawn(fake.clone()).await?;
    let client = client(&base_url)?;

    let request = GenerateRequest::new(
        "Welcome back to the channel.",
        ResponseFormat::Speech {
            voice: Some("Kore".to_string()),
        },
    );
    let response = client.generate(&request).await?;

    assert_eq!(
        response.outputs,
        vec![Output::Audio {
            mime: Some("audio/L16;codec=pcm;rate=24000".to_string()),
            data: vec![0, 1, 2, 3],
        }]
    );
    let seen = fake.seen();
    assert_eq!(seen[0].call, "gemini-2.5-flash-preview-tts:generateContent");
    assert_eq!(
        seen[0].body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
            ["voiceName"],
        "Kore"
    );
    Ok(())
}

#[tokio::test]
async fn test_request_model_override_is_routed() -> anyhow::Result<()> {
    let fake = FakeGemini::new(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "plain words"}]}}]}).to_string(),
    );
    let base_url = spawn(fake.clone()).await?;
    let client = client(&base_url)?;

    let request = GenerateRequest::new("hi", ResponseFormat::Text).with_model("gemini-2.5-pro");
    let response = client.generate(&request).await?;
    client
        .generate(&GenerateRequest::new("again", ResponseFormat::Text))
        .await?;

    assert_eq!(response.outputs, vec![Output::Text("plain words".to_string())]);
    let calls: Vec<String> = fake.seen().into_iter().map(|s| s.call).collect();
    assert_eq!(
        calls,
        vec![
            "gemini-2.5-pro:generateContent",
            "gemini-2.0-flash:generateContent"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_backend_unavailable() -> anyhow::Result<()> {
    let fake = FakeGemini::new(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}})
            .to_string(),
    );
    let base_url = spawn(fake).await?;
    let client = client(&base_url)?;

    let err = client
        .generate(&GenerateRequest::new("hi", ResponseFormat::Text))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::BackendUnavailable);
    assert!(err.to_string().contains("The model is overloaded."));
    Ok(())
}

#[tokio::test]
async fn test_unparseable_body_is_malformed_output() -> anyhow::Result<()> {
    let fake = FakeGemini::new(StatusCode::OK, "<html>not json</html>");
    let base_url = spawn(fake).await?;
    let client = client(&base_url)?;

    let err = client
        .generate(&GenerateRequest::new("hi", ResponseFormat::Text))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::MalformedOutput);
    Ok(())
}

#[tokio::test]
async fn test_blocked_prompt_is_malformed_output() -> anyhow::Result<()> {
    let fake = FakeGemini::new(
        StatusCode::OK,
        json!({"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
    );
    let base_url = spawn(fake).await?;
    let client = client(&base_url)?;

    let err = client
        .generate(&GenerateRequest::new("hi", ResponseFormat::Text))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::MalformedOutput);
    assert!(err.to_string().contains("SAFETY"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_backend_unavailable() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    let client = client(&format!("http://{}", addr))?;

    let err = client
        .generate(&GenerateRequest::new("hi", ResponseFormat::Text))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::BackendUnavailable);
    Ok(())
}

#[test]
fn test_blank_api_key_is_rejected() {
    let err = GeminiClient::with_api_key("  ", GeminiConfig::default()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ConfigurationMissing);
}
