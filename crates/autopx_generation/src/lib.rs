//! Prompt templates and the generation orchestrator.
//!
//! A template is a fixed text-generation task: it renders its typed input into a prompt,
//! declares the response shape it expects, and validates the backend's answer against its
//! output contract. [`ContentGenerator`] runs a template against a [`GenerationBackend`] with
//! exactly one backend call per run.
//!
//! [`GenerationBackend`]: autopx_interface::GenerationBackend

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod orchestrator;
mod render;
pub mod templates;
mod wav;

pub use extraction::{extract_json, parse_json, structured};
pub use orchestrator::ContentGenerator;
pub use render::render;
pub use templates::{
    AdjustTone, AdjustToneInput, AdjustedTone, ContentPackage, GeneratePost, GeneratePostInput,
    GenerateTitles, GeneratedPosts, NarrateScript, NarratedAudio, NarrationInput,
    OptimizeForPlatform, OptimizeInput, OptimizedContent, PromptTemplate, TemplateId, Titles,
    TitlesInput, UniversalPost, UniversalPostInput,
};
pub use wav::{pcm_to_wav, sample_rate_from_mime};
