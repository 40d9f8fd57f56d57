//! Mock generation backend and platform adapters.

use async_trait::async_trait;
use autopx_core::{Brand, GenerateRequest, GenerateResponse, Output, PostId, PublishPlatform};
use autopx_error::{
    GenerationError, GenerationErrorKind, GenerationResult, PublishError, PublishErrorKind,
    PublishResult,
};
use autopx_generation::ContentGenerator;
use autopx_interface::{GenerationBackend, SocialPlatform};
use autopx_server::Studio;
use std::sync::{Arc, Mutex};

/// Backend that always gives the same answer and counts calls.
pub struct MockBackend {
    response: Result<Vec<Output>, GenerationErrorKind>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockBackend {
    /// Always answer with this JSON value.
    pub fn json(value: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(vec![Output::Json(value)]),
            requests: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Always answer with raw audio.
    #[allow(dead_code)]
    pub fn audio(mime: &str, data: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(vec![Output::Audio {
                mime: Some(mime.to_string()),
                data,
            }]),
            requests: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Always fail.
    #[allow(dead_code)]
    pub fn error(kind: GenerationErrorKind) -> Arc<Self> {
        Arc::new(Self {
            response: Err(kind),
            requests: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Number of generate() calls.
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
        self.requests.lock().unwrap().push(req.clone());
        match &self.response {
            Ok(outputs) => Ok(GenerateResponse::from(outputs.clone())),
            Err(kind) => Err(GenerationError::new(kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Platform adapter that records texts and returns a fixed result.
pub struct MockPlatform {
    platform: PublishPlatform,
    result: Result<String, PublishErrorKind>,
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockPlatform {
    /// Every publish succeeds with this id.
    pub fn succeeding(platform: PublishPlatform, id: &str) -> Arc<Self> {
        Arc::new(Self {
            platform,
            result: Ok(id.to_string()),
            texts: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Every publish fails with this kind.
    #[allow(dead_code)]
    pub fn failing(platform: PublishPlatform, kind: PublishErrorKind) -> Arc<Self> {
        Arc::new(Self {
            platform,
            result: Err(kind),
            texts: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Texts received so far.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPlatform for MockPlatform {
    fn platform(&self) -> PublishPlatform {
        self.platform
    }

    async fn try_publish(&self, text: &str) -> PublishResult<PostId> {
        self.texts.lock().unwrap().push(text.to_string());
        match &self.result {
            Ok(id) => Ok(PostId::new(id.clone())),
            Err(kind) => Err(PublishError::new(kind.clone())),
        }
    }
}

/// Studio over the given doubles with the default brand.
pub fn studio(
    backend: &Arc<MockBackend>,
    facebook: &Arc<MockPlatform>,
    x: &Arc<MockPlatform>,
) -> Studio {
    Studio::new(
        ContentGenerator::new(backend.clone()),
        Brand::default(),
        facebook.clone(),
        x.clone(),
    )
}
