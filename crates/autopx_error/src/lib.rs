//! Error types for the autopx content studio.
//!
//! This crate provides the foundation error types used throughout the autopx workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every domain error also reports an [`ErrorCategory`], the coarse taxonomy the action layer
//! uses to pick a status and a user-facing message.
//!
//! # Examples
//!
//! ```
//! use autopx_error::{AutopxResult, ErrorCategory, GenerationError, GenerationErrorKind};
//!
//! fn generate() -> AutopxResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::BackendUnavailable(
//!         "connection refused".to_string(),
//!     )))?
//! }
//!
//! let err = generate().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::BackendUnavailable);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod config;
mod error;
mod generation;
mod http;
mod json;
mod publish;
mod validation;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use error::{AutopxError, AutopxErrorKind, AutopxResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use http::HttpError;
pub use json::JsonError;
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use validation::{FieldViolation, ValidationError, ValidationResult};
