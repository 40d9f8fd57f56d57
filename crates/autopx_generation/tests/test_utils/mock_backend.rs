//! Mock generation backend for testing.

use async_trait::async_trait;
use autopx_core::{GenerateRequest, GenerateResponse, Output};
use autopx_error::{GenerationError, GenerationErrorKind, GenerationResult};
use autopx_interface::GenerationBackend;
use std::sync::{Arc, Mutex};

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Vec<Output>),
    Error(GenerationErrorKind),
}

/// Mock backend that replays canned responses and records every request.
pub struct MockBackend {
    responses: Vec<MockResponse>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockBackend {
    /// Always answer with this JSON value.
    pub fn json(value: serde_json::Value) -> Self {
        Self::sequence(vec![MockResponse::Success(vec![Output::Json(value)])])
    }

    /// Always answer with this text.
    #[allow(dead_code)]
    pub fn text(text: impl Into<String>) -> Self {
        Self::sequence(vec![MockResponse::Success(vec![Output::Text(text.into())])])
    }

    /// Always fail with the given error.
    pub fn error(kind: GenerationErrorKind) -> Self {
        Self::sequence(vec![MockResponse::Error(kind)])
    }

    /// Replay responses in order; the last one repeats once the sequence is exhausted.
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, req: &GenerateRequest) -> GenerationResult<GenerateResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };
        let response = self
            .responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or_else(|| {
                MockResponse::Error(GenerationErrorKind::BackendUnavailable(
                    "no mock responses configured".to_string(),
                ))
            });

        match response {
            MockResponse::Success(outputs) => Ok(GenerateResponse::from(outputs)),
            MockResponse::Error(kind) => Err(GenerationError::new(kind)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
