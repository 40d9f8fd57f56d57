//! Trait definitions for the autopx content studio.
//!
//! Two seams: the hosted model that turns prompts into output, and the social platforms
//! text is published to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{GenerationBackend, SocialPlatform};
