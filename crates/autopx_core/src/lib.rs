//! Core data types for the autopx content studio.
//!
//! Everything here is transient: requests and outcomes live for a single action and are never
//! persisted or shared between concurrent invocations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brand;
mod outcome;
mod output;
mod platform;
mod request;
mod validate;

pub use brand::Brand;
pub use outcome::{PostId, PublishOutcome};
pub use output::Output;
pub use platform::{PublishPlatform, TargetPlatform};
pub use request::{GenerateRequest, GenerateResponse, ResponseFormat, Usage};
pub use validate::{Validate, Violations};
