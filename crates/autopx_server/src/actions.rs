//! The action layer.
//!
//! One entry point per user-triggered operation. Each converts a raw form into a typed input,
//! rejecting it with [`ActionError::invalid`] before any external call, then delegates to the
//! orchestrator or a platform adapter. Downstream failures are logged in full here and surfaced
//! only as the operation's message and category.

use crate::{
    ActionError, ActionResult, AudioForm, HashtagsForm, Operation, OptimizeForm, PackageForm,
    PostForm, PublishForm, PublishText, TitlesForm, ToneForm,
};
use autopx_core::{Brand, PublishOutcome, PublishPlatform};
use autopx_error::{ErrorCategory, ValidationError};
use autopx_generation::{
    AdjustTone, AdjustedTone, ContentGenerator, ContentPackage, GeneratePost, GenerateTitles,
    GeneratedPosts, NarrateScript, NarratedAudio, OptimizeForPlatform, OptimizeInput,
    OptimizedContent, PromptTemplate, Titles, UniversalPost,
};
use autopx_interface::SocialPlatform;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{error, info, instrument, warn};

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("Valid hashtag regex"));

/// Hashtags suggested for a post, and the post with them appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedHashtags {
    /// Original content, a blank line, then the tags separated by spaces
    pub content: String,
    /// Tags in the order they appeared
    pub hashtags: Vec<String>,
}

/// Every hashtag in `text`, in order.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Validated entry points for every studio operation.
pub struct Studio {
    generator: ContentGenerator,
    brand: Brand,
    titles: GenerateTitles,
    universal: UniversalPost,
    narrator: NarrateScript,
    facebook: Arc<dyn SocialPlatform>,
    x: Arc<dyn SocialPlatform>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("generator", &self.generator)
            .field("brand", &self.brand)
            .field("facebook", &self.facebook.platform())
            .field("x", &self.x.platform())
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Assemble a studio from a generator, a brand and the two platform adapters.
    pub fn new(
        generator: ContentGenerator,
        brand: Brand,
        facebook: Arc<dyn SocialPlatform>,
        x: Arc<dyn SocialPlatform>,
    ) -> Self {
        Self {
            generator,
            titles: GenerateTitles::new(brand.clone()),
            universal: UniversalPost::new(brand.clone()),
            brand,
            narrator: NarrateScript::default(),
            facebook,
            x,
        }
    }

    /// Narrate audio with a specific template configuration (e.g. a fixed voice).
    pub fn with_narrator(mut self, narrator: NarrateScript) -> Self {
        self.narrator = narrator;
        self
    }

    /// Persona the educational templates write as.
    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    /// Draft posts for Facebook, X or both.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a bad form; otherwise "Failed to generate post with AI."
    #[instrument(skip_all)]
    pub async fn generate_post(&self, form: PostForm) -> ActionResult<GeneratedPosts> {
        let input = accept(Operation::GeneratePost, form)?;
        self.run(Operation::GeneratePost, &GeneratePost, &input).await
    }

    /// Build a universal content package for a topic.
    #[instrument(skip_all)]
    pub async fn generate_package(&self, form: PackageForm) -> ActionResult<ContentPackage> {
        let input = accept(Operation::GeneratePackage, form)?;
        self.run(Operation::GeneratePackage, &self.universal, &input).await
    }

    /// Narrate a script into a `data:` URI.
    #[instrument(skip_all)]
    pub async fn generate_audio(&self, form: AudioForm) -> ActionResult<NarratedAudio> {
        let input = accept(Operation::GenerateAudio, form)?;
        self.run(Operation::GenerateAudio, &self.narrator, &input).await
    }

    /// Rewrite a post in another tone.
    #[instrument(skip_all)]
    pub async fn adjust_tone(&self, form: ToneForm) -> ActionResult<AdjustedTone> {
        let input = accept(Operation::AdjustTone, form)?;
        self.run(Operation::AdjustTone, &AdjustTone, &input).await
    }

    /// Optimise a post for one platform.
    #[instrument(skip_all)]
    pub async fn optimize(&self, form: OptimizeForm) -> ActionResult<OptimizedContent> {
        let input = accept(Operation::Optimize, form)?;
        self.run(Operation::Optimize, &OptimizeForPlatform, &input).await
    }

    /// Suggest titles for a post.
    #[instrument(skip_all)]
    pub async fn generate_titles(&self, form: TitlesForm) -> ActionResult<Titles> {
        let input = accept(Operation::GenerateTitles, form)?;
        self.run(Operation::GenerateTitles, &self.titles, &input).await
    }

    /// Optimise the post for X, then append the hashtags found in the result.
    ///
    /// # Errors
    ///
    /// "Could not suggest hashtags." when generation fails or the optimised post has no tags.
    #[instrument(skip_all)]
    pub async fn suggest_hashtags(&self, form: HashtagsForm) -> ActionResult<SuggestedHashtags> {
        let operation = Operation::SuggestHashtags;
        let input: OptimizeInput = accept(operation, form)?;
        let optimized = self.run(operation, &OptimizeForPlatform, &input).await?;

        let hashtags = extract_hashtags(&optimized.optimized_content);
        if hashtags.is_empty() {
            warn!("Could not extract hashtags from the optimized content");
            return Err(ActionError::downstream(operation, ErrorCategory::MalformedOutput));
        }

        Ok(SuggestedHashtags {
            content: format!("{}\n\n{}", input.content, hashtags.join(" ")),
            hashtags,
        })
    }

    /// Publish text to one platform.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank text; otherwise "Failed to publish to Facebook." or
    /// "Failed to publish to X." with the adapter's category.
    #[instrument(skip_all, fields(platform = %platform))]
    pub async fn publish(
        &self,
        platform: PublishPlatform,
        form: PublishForm,
    ) -> ActionResult<PublishOutcome> {
        let (operation, adapter) = match platform {
            PublishPlatform::Facebook => (Operation::PublishFacebook, &self.facebook),
            PublishPlatform::X => (Operation::PublishX, &self.x),
        };
        let text: PublishText = accept(operation, form)?;

        match adapter.try_publish(text.as_str()).await {
            Ok(post_id) => {
                info!(%post_id, "Published to {}", platform.label());
                Ok(PublishOutcome::published(post_id))
            }
            Err(e) => {
                error!(
                    category = %e.category(),
                    error = %e.kind,
                    "Error posting to {}",
                    platform.label()
                );
                Err(ActionError::downstream(operation, e.category()))
            }
        }
    }

    async fn run<T>(
        &self,
        operation: Operation,
        template: &T,
        input: &T::Input,
    ) -> ActionResult<T::Output>
    where
        T: PromptTemplate,
    {
        self.generator.run(template, input).await.map_err(|e| {
            error!(%operation, category = %e.category(), error = %e, "Action failed");
            ActionError::from_generation(operation, &e)
        })
    }
}

fn accept<F, I>(operation: Operation, form: F) -> ActionResult<I>
where
    F: TryInto<I, Error = ValidationError>,
{
    form.try_into().map_err(|e: ValidationError| {
        warn!(%operation, error = %e, "Rejected input");
        ActionError::invalid(operation, e)
    })
}
