//! Hosted model backends for autopx.
//!
//! Currently a single provider: Google Gemini through `gemini-rust`, used both for structured
//! text generation and for text-to-speech.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;

pub use gemini::{GeminiClient, GeminiConfig};
pub use metrics::LlmMetrics;
