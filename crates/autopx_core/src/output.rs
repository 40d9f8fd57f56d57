//! Output types from backend responses.

use serde::{Deserialize, Serialize};

/// A single part of a backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),

    /// Generated audio output (text-to-speech).
    Audio {
        /// MIME type of the audio, including parameters such as `rate=24000`
        mime: Option<String>,
        /// Binary audio data
        data: Vec<u8>,
    },
}
