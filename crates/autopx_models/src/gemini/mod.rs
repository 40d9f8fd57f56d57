//! Google Gemini backend.

mod client;
mod config;

pub use client::GeminiClient;
pub use config::GeminiConfig;
