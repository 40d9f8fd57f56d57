//! autopx - a topic-to-post content studio.
//!
//! autopx turns a topic into social-media copy through a fixed library of prompt templates,
//! narrates scripts to audio, and publishes text to a Facebook Page or X.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autopx::{AppState, PostForm, StudioConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StudioConfig::load()?;
//!     let state = AppState::from_config(&config)?;
//!
//!     let posts = state
//!         .studio()
//!         .generate_post(PostForm {
//!             topic: Some("The future of renewable energy".to_string()),
//!             platform: Some("both".to_string()),
//!             tone: Some("Casual".to_string()),
//!         })
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&posts)?);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry (stdout exporter)
//! - `api` - enable tests that call the real Gemini API
//!
//! # Architecture
//!
//! - `autopx_error` - Error types and the error taxonomy
//! - `autopx_core` - Platforms, generation request/response, publish outcomes, validation
//! - `autopx_interface` - `GenerationBackend` and `SocialPlatform` traits
//! - `autopx_models` - Gemini backend
//! - `autopx_generation` - Prompt templates and the `ContentGenerator` orchestrator
//! - `autopx_social` - Facebook and X adapters
//! - `autopx_server` - Action layer, configuration, HTTP API
//!
//! This crate (`autopx`) re-exports everything for convenience.

pub use autopx_core::*;
pub use autopx_error::*;
pub use autopx_generation::*;
pub use autopx_interface::*;
pub use autopx_models::*;
pub use autopx_server::*;
pub use autopx_social::*;

pub mod cli;
mod logging;

pub use logging::{LogFormat, init_logging};

#[cfg(feature = "observability")]
pub mod observability;
