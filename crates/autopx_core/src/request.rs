//! Request and response types for a single backend call.

use crate::Output;
use serde::{Deserialize, Serialize};

/// What shape of response the backend should produce.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// JSON conforming to an OpenAPI-subset schema
    Json {
        /// Response schema (`type`, `properties`, `required`, `items`)
        schema: serde_json::Value,
    },
    /// Spoken audio of the prompt
    Speech {
        /// Prebuilt voice name; the backend default is used when absent
        voice: Option<String>,
    },
}

/// One rendered prompt, ready to be sent to a backend.
///
/// # Examples
///
/// ```
/// use autopx_core::{GenerateRequest, ResponseFormat};
///
/// let request = GenerateRequest::new("Write a haiku about tidal power.", ResponseFormat::Text)
///     .with_temperature(0.4);
///
/// assert_eq!(request.temperature, Some(0.4));
/// assert!(request.model.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Fully rendered instruction text
    pub prompt: String,
    /// Expected response shape
    #[serde(default)]
    pub format: ResponseFormat,
    /// Model override; the backend's configured model is used when absent
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature override
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Request with the backend's default model and temperature.
    pub fn new(prompt: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            prompt: prompt.into(),
            format,
            model: None,
            temperature: None,
        }
    }

    /// Send this request to a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the backend's sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u64,
    /// Tokens in the generated candidates
    pub completion_tokens: u64,
    /// Total tokens billed
    pub total_tokens: u64,
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use autopx_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::from(vec![
///     Output::Text("Hello, ".to_string()),
///     Output::Text("world".to_string()),
/// ]);
///
/// assert_eq!(response.text(), "Hello, world");
/// assert!(response.json().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs, in the order the backend returned them
    pub outputs: Vec<Output>,
    /// Token usage, when the backend reports it
    pub usage: Option<Usage>,
}

impl GenerateResponse {
    /// All text parts concatenated.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The first structured JSON part, if any.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.outputs.iter().find_map(|output| match output {
            Output::Json(value) => Some(value),
            _ => None,
        })
    }

    /// The first audio part as `(mime, data)`.
    pub fn audio(&self) -> Option<(Option<&str>, &[u8])> {
        self.outputs.iter().find_map(|output| match output {
            Output::Audio { mime, data } => Some((mime.as_deref(), data.as_slice())),
            _ => None,
        })
    }
}

impl From<Vec<Output>> for GenerateResponse {
    fn from(outputs: Vec<Output>) -> Self {
        Self {
            outputs,
            usage: None,
        }
    }
}
