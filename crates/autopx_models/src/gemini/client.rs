//! Gemini backend built on `gemini-rust`.

use super::GeminiConfig;
use crate::LlmMetrics;
use async_trait::async_trait;
use autopx_core::{GenerateRequest, GenerateResponse, Output, ResponseFormat, Usage};
use autopx_error::{AutopxResult, ConfigError, GenerationError, GenerationResult, HttpError};
use autopx_interface::GenerationBackend;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use gemini_rust::{
    ClientError, ContentBuilder, FinishReason, Gemini, GeminiBuilder, GenerationResponse, Model,
    Part, UsageMetadata,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

const PROVIDER: &str = "gemini";

/// Gemini API client implementing [`GenerationBackend`].
///
/// Structured templates are sent with a response schema; speech requests ask for the `AUDIO`
/// modality with a prebuilt voice and come back as base64 PCM. One `gemini_rust::Gemini` is kept
/// per model, created on first use.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: Url,
    config: GeminiConfig,
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client using `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither API key variable is set
    /// - The configured base URL is not a valid URL
    /// - The underlying HTTP client cannot be initialized
    #[instrument(skip_all)]
    pub fn new(config: GeminiConfig) -> AutopxResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ConfigError::new("GEMINI_API_KEY is not set"))?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or not a valid header value, or the base URL is
    /// invalid.
    #[instrument(skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, config: GeminiConfig) -> AutopxResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::new("Gemini API key is empty").into());
        }
        let base_url = api_root(config.base_url())?;

        let client = Self {
            api_key,
            base_url,
            config,
            clients: Arc::new(Mutex::new(HashMap::new())),
        };
        // Build the default text client now so a bad key or URL fails at startup.
        client
            .client_for(client.config.model())
            .map_err(|e| ConfigError::new(format!("Failed to create Gemini client: {}", e.kind)))?;

        debug!(
            model = %client.config.model(),
            base_url = %client.base_url,
            "Gemini client ready"
        );
        Ok(client)
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn client_for(&self, model: &str) -> GenerationResult<Gemini> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(model) {
            return Ok(client.clone());
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("autopx/", env!("CARGO_PKG_VERSION")));
        let client = GeminiBuilder::new(self.api_key.as_str())
            .with_model(model_path(model))
            .with_base_url(self.base_url.clone())
            .with_http_client(http)
            .build()
            .map_err(|e| GenerationError::unavailable(describe(&e)))?;

        debug!(model, "Created Gemini client for model");
        clients.insert(model.to_string(), client.clone());
        Ok(client)
    }

    fn content(&self, client: &Gemini, req: &GenerateRequest) -> ContentBuilder {
        let builder = client.generate_content().with_user_message(req.prompt.as_str());
        let temperature = req.temperature.unwrap_or(*self.config.temperature());
        match &req.format {
            ResponseFormat::Text => builder.with_temperature(temperature),
            ResponseFormat::Json { schema } => builder
                .with_temperature(temperature)
                .with_response_mime_type("application/json")
                .with_response_schema(schema.clone()),
            ResponseFormat::Speech { voice } => {
                builder.with_voice(voice.as_deref().unwrap_or(self.config.voice().as_str()))
            }
        }
    }

    async fn call(&self, model: &str, req: &GenerateRequest) -> GenerationResult<GenerateResponse> {
        let client = self.client_for(model)?;
        debug!(model, "Sending Gemini API request");

        let response = self
            .content(&client, req)
            .execute()
            .await
            .map_err(classify)?;

        convert_response(response, &req.format)
    }
}

/// `base_url` plus the API version segment, with the trailing slash `Url::join` needs.
fn api_root(base_url: &str) -> AutopxResult<Url> {
    let root = format!("{}/v1beta/", base_url.trim_end_matches('/'));
    Url::parse(&root).map_err(|e| {
        HttpError::new(format!("Invalid Gemini base URL {}: {}", base_url, e)).into()
    })
}

/// Model names are configured bare ("gemini-2.0-flash"); the API wants `models/<name>`.
fn model_path(model: &str) -> Model {
    if model.starts_with("models/") {
        Model::Custom(model.to_string())
    } else {
        Model::Custom(format!("models/{}", model))
    }
}

fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Sort a `gemini-rust` failure into the generation taxonomy.
fn classify(err: ClientError) -> GenerationError {
    match &err {
        ClientError::BadResponse { code, description } => {
            let detail = description
                .as_deref()
                .map(api_message)
                .unwrap_or_else(|| "no response body".to_string());
            GenerationError::unavailable(format!("Gemini returned {}: {}", code, detail))
        }
        ClientError::DecodeResponse { .. } | ClientError::Deserialize { .. } => {
            GenerationError::malformed(format!("Failed to parse Gemini response: {}", describe(&err)))
        }
        _ => GenerationError::unavailable(format!("Request failed: {}", describe(&err))),
    }
}

/// The `error.message` (and `error.status`) of a Gemini error body, or the body itself.
fn api_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let message = error.and_then(|e| e.get("message")).and_then(|m| m.as_str());
    let status = error.and_then(|e| e.get("status")).and_then(|s| s.as_str());
    match (message, status) {
        (Some(message), Some(status)) => format!("{} ({})", message, status),
        (Some(message), None) => message.to_string(),
        _ => body.to_string(),
    }
}

/// The SCREAMING_SNAKE_CASE name Gemini uses on the wire.
fn wire_name(value: &impl Serialize) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => "UNKNOWN".to_string(),
    }
}

fn usage(metadata: &UsageMetadata) -> Usage {
    let count = |n: Option<i32>| n.and_then(|n| u64::try_from(n).ok()).unwrap_or(0);
    Usage {
        prompt_tokens: count(metadata.prompt_token_count),
        completion_tokens: count(metadata.candidates_token_count),
        total_tokens: count(metadata.total_token_count),
    }
}

fn convert_response(
    response: GenerationResponse,
    format: &ResponseFormat,
) -> GenerationResult<GenerateResponse> {
    let usage = response.usage_metadata.as_ref().map(usage);

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!(" (blocked: {})", wire_name(&reason)))
            .unwrap_or_default();
        return Err(GenerationError::malformed(format!(
            "Gemini returned no candidates{}",
            reason
        )));
    };

    if let Some(reason) = &candidate.finish_reason
        && *reason != FinishReason::Stop
    {
        warn!(finish_reason = %wire_name(reason), "Gemini candidate did not finish normally");
    }

    let mut outputs = Vec::new();
    for part in candidate.content.parts.unwrap_or_default() {
        match part {
            Part::InlineData { inline_data, .. } => {
                let data = BASE64.decode(inline_data.data.as_bytes()).map_err(|e| {
                    GenerationError::malformed(format!("Invalid base64 in inline data: {}", e))
                })?;
                outputs.push(Output::Audio {
                    mime: Some(inline_data.mime_type),
                    data,
                });
            }
            Part::Text {
                thought: Some(true),
                ..
            } => {}
            Part::Text { text, .. } => {
                let output = match format {
                    ResponseFormat::Json { .. } => serde_json::from_str(&text)
                        .map(Output::Json)
                        .unwrap_or(Output::Text(text)),
                    _ => Output::Text(text),
                };
                outputs.push(output);
            }
            _ => {}
        }
    }

    if outputs.is_empty() {
        return Err(GenerationError::malformed("Gemini candidate has no content"));
    }

    Ok(GenerateResponse { outputs, usage })
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    #[instrument(skip(self, req), fields(model = tracing::field::Empty))]
    async fn generate(&self, req: &GenerateRequest) -> GenerationResult<GenerateResponse> {
        let model = self.model_for(req).to_string();
        tracing::Span::current().record("model", model.as_str());

        let metrics = LlmMetrics::get();
        let started = Instant::now();
        let result = self.call(&model, req).await;
        metrics.record_request(PROVIDER, &model, started.elapsed().as_secs_f64());

        match &result {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    metrics.record_tokens(&model, usage);
                }
                debug!(outputs = response.outputs.len(), "Gemini request completed");
            }
            Err(e) => {
                metrics.record_error(PROVIDER, &model, e.category());
                warn!(error = %e, "Gemini request failed");
            }
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }

    fn model_for<'a>(&'a self, req: &'a GenerateRequest) -> &'a str {
        match (&req.model, &req.format) {
            (Some(model), _) => model,
            (None, ResponseFormat::Speech { .. }) => self.config.speech_model(),
            (None, _) => self.config.model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> GeminiClient {
        GeminiClient::with_api_key("test-key", GeminiConfig::default()).unwrap()
    }

    fn body(client: &GeminiClient, req: &GenerateRequest) -> serde_json::Value {
        let gemini = client.client_for(client.model_for(req)).unwrap();
        serde_json::to_value(client.content(&gemini, req).build()).unwrap()
    }

    #[test]
    fn test_json_request_declares_schema() {
        let schema = json!({"type": "OBJECT", "properties": {"xPost": {"type": "STRING"}}});
        let req = GenerateRequest::new("prompt", ResponseFormat::Json { schema: schema.clone() });
        let body = body(&client(), &req);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
        assert!(body["generationConfig"].get("speechConfig").is_none());
    }

    #[test]
    fn test_speech_request_uses_speech_model_and_voice() {
        let client = client();
        let req = GenerateRequest::new("Read this", ResponseFormat::Speech { voice: None });
        let body = body(&client, &req);

        assert_eq!(client.model_for(&req), "gemini-2.5-flash-preview-tts");
        assert_eq!(client.model_name(), "gemini-2.0-flash");
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Algenib"
        );
    }

    #[test]
    fn test_request_model_overrides_speech_default() {
        let req = GenerateRequest::new("Read this", ResponseFormat::Speech { voice: None })
            .with_model("gemini-2.5-pro-preview-tts");
        assert_eq!(client().model_for(&req), "gemini-2.5-pro-preview-tts");
    }

    #[test]
    fn test_model_path_adds_prefix_once() {
        assert_eq!(model_path("gemini-2.0-flash").as_str(), "models/gemini-2.0-flash");
        assert_eq!(
            model_path("models/gemini-2.0-flash").as_str(),
            "models/gemini-2.0-flash"
        );
    }

    #[test]
    fn test_api_root_appends_version() {
        let root = api_root("http://127.0.0.1:9000/").unwrap();
        assert_eq!(root.as_str(), "http://127.0.0.1:9000/v1beta/");
        assert!(api_root("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn test_api_message_prefers_error_body() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded.", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(api_message(body), "Quota exceeded. (RESOURCE_EXHAUSTED)");
        assert_eq!(api_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_json_text_part_becomes_json_output() {
        let response: GenerationResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"xPost\": \"hi\"}"}]}, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5, "totalTokenCount": 8}
        }))
        .unwrap();
        let format = ResponseFormat::Json { schema: json!({}) };
        let converted = convert_response(response, &format).unwrap();

        assert_eq!(converted.json(), Some(&json!({"xPost": "hi"})));
        assert_eq!(converted.usage.map(|u| u.total_tokens), Some(8));
    }
}
