//! Action layer, configuration and HTTP API for the autopx content studio.
//!
//! [`Studio`] holds one validated entry point per user-triggered operation. Raw forms are
//! converted into typed template inputs at the boundary; anything invalid is rejected before a
//! backend or platform is contacted. [`create_router`] exposes the same operations as JSON over
//! HTTP, and [`StudioConfig`] loads the layered configuration both surfaces share.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actions;
mod api;
mod config;
mod error;
mod forms;
mod server;
mod state;

pub use actions::{Studio, SuggestedHashtags, extract_hashtags};
pub use api::create_router;
pub use config::{FacebookConfig, ServerConfig, StudioConfig, XConfig};
pub use error::{ActionError, ActionResult, Operation};
pub use forms::{
    AudioForm, HashtagsForm, OptimizeForm, PackageForm, PostForm, PublishForm, PublishText,
    TitlesForm, ToneForm,
};
pub use server::{serve, serve_on};
pub use state::AppState;
