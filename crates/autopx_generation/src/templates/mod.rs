//! The fixed library of prompt templates.

mod audio;
mod optimize;
mod post;
mod schema;
mod titles;
mod tone;
mod universal;

pub use audio::{NarrateScript, NarratedAudio, NarrationInput};
pub use optimize::{OptimizeForPlatform, OptimizeInput, OptimizedContent, X_CHARACTER_LIMIT};
pub use post::{GeneratePost, GeneratePostInput, GeneratedPosts};
pub use titles::{GenerateTitles, Titles, TitlesInput, X_TITLE_LIMIT};
pub use tone::{AdjustTone, AdjustToneInput, AdjustedTone};
pub use universal::{ContentPackage, UniversalPost, UniversalPostInput};

use autopx_core::{GenerateRequest, GenerateResponse, Validate};
use autopx_error::{GenerationError, GenerationResult};
use serde::Serialize;

/// Stable template identifiers, used in logs and metrics.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TemplateId {
    /// Draft posts for one or both platforms
    GeneratePost,
    /// Rewrite a post in a different tone
    AdjustTone,
    /// Adapt a post to one platform's conventions
    OptimizeForPlatform,
    /// Suggest titles for a post
    GenerateTitles,
    /// Full educational content package
    GenerateUniversalPost,
    /// Narrate a script to audio
    GenerateAudio,
}

impl TemplateId {
    /// Kebab-case identifier.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A named, fixed text-generation task.
///
/// Templates have no side effects: `request` renders the prompt and `decode` checks the backend's
/// answer against the output contract. Any violation is `MalformedOutput`; partial results are
/// never returned.
pub trait PromptTemplate: Send + Sync {
    /// Template identifier.
    const ID: TemplateId;

    /// Typed input; validated before any backend call.
    type Input: Validate + Send + Sync;

    /// Typed output satisfying the template's contract.
    type Output: Serialize + Send;

    /// Render the instruction text and declare the expected response format.
    fn request(&self, input: &Self::Input) -> GenerateRequest;

    /// Validate a backend response against the output contract.
    ///
    /// # Errors
    ///
    /// Returns `MalformedOutput` when the response does not conform.
    fn decode(
        &self,
        input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output>;
}

/// Trim a required output string, rejecting empty values.
fn required_text(field: &str, value: Option<String>) -> GenerationResult<String> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::malformed(format!(
            "`{}` is missing or empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim every entry of a list and check its length is within `min..=max`.
fn required_list(
    field: &str,
    values: Vec<String>,
    min: usize,
    max: usize,
) -> GenerationResult<Vec<String>> {
    let values = values
        .into_iter()
        .map(|value| required_text(field, Some(value)))
        .collect::<GenerationResult<Vec<_>>>()?;
    if values.len() < min || values.len() > max {
        return Err(GenerationError::malformed(format!(
            "`{}` must have {}-{} entries, got {}",
            field,
            min,
            max,
            values.len()
        )));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_template_ids_are_kebab_case() {
        let ids: Vec<_> = TemplateId::iter().map(TemplateId::as_str).collect();
        assert_eq!(
            ids,
            vec![
                "generate-post",
                "adjust-tone",
                "optimize-for-platform",
                "generate-titles",
                "generate-universal-post",
                "generate-audio",
            ]
        );
    }

    #[test]
    fn test_required_list_bounds() {
        let one = vec!["Only one".to_string()];
        assert!(required_list("titles", one, 2, 3).is_err());
        let blank = vec!["A".to_string(), "  ".to_string()];
        assert!(required_list("titles", blank, 2, 3).is_err());
        let ok = vec![" A ".to_string(), "B".to_string()];
        assert_eq!(required_list("titles", ok, 2, 3).unwrap(), vec!["A", "B"]);
    }
}
