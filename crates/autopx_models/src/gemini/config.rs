//! Gemini backend settings.

use serde::{Deserialize, Serialize};

/// Non-secret Gemini settings, loaded from the `[gemini]` configuration section.
///
/// The API key is never part of this struct; it comes from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct GeminiConfig {
    /// API root, without the version segment
    base_url: String,
    /// Model used for text and structured output
    model: String,
    /// Model used for text-to-speech
    speech_model: String,
    /// Default prebuilt voice for speech
    voice: String,
    /// Default sampling temperature
    temperature: f32,
}

impl GeminiConfig {
    /// Point the client at a different API root (local fakes, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: "Algenib".to_string(),
            temperature: 0.7,
        }
    }
}
