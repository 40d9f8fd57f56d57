//! `optimize-for-platform`: adapt a post to one platform's conventions.

use super::{PromptTemplate, TemplateId, required_text, schema};
use crate::{render, structured};
use autopx_core::{
    GenerateRequest, GenerateResponse, PublishPlatform, ResponseFormat, Validate, Violations,
};
use autopx_error::{GenerationError, GenerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

/// Maximum length of an X post, in characters.
pub const X_CHARACTER_LIMIT: usize = 280;

const INSTRUCTIONS: &str = "\
You are an expert social media manager.

You will optimize the following post content for the specified social media platform.

Original Content: {{content}}
Platform: {{platform}}

If the platform is X (Twitter), keep the post concise and engaging, using relevant hashtags and \
calls to action, and make sure it is less than 280 characters. If it's more than 280 characters \
then please shorten it.
If the platform is Facebook, make the post more detailed and engaging, using a wider range of \
language and emojis.

Optimize the post to get maximum engagement.
";

/// Input for [`OptimizeForPlatform`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeInput {
    /// The original post
    pub content: String,
    /// Target platform
    pub platform: PublishPlatform,
}

impl Validate for OptimizeInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.not_blank("content", &self.content);
        violations.finish()
    }
}

/// Output of [`OptimizeForPlatform`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedContent {
    /// The optimised post
    pub optimized_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptimized {
    #[serde(default)]
    optimized_content: Option<String>,
}

/// Optimises a post for Facebook or X.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizeForPlatform;

impl PromptTemplate for OptimizeForPlatform {
    const ID: TemplateId = TemplateId::OptimizeForPlatform;
    type Input = OptimizeInput;
    type Output = OptimizedContent;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        let prompt = render(
            INSTRUCTIONS,
            &[
                ("content", input.content.trim()),
                ("platform", input.platform.label()),
            ],
        );
        let schema = schema::object(
            &[(
                "optimizedContent",
                schema::string("The optimized content of the post for the specified platform."),
            )],
            &["optimizedContent"],
        );
        GenerateRequest::new(prompt, ResponseFormat::Json { schema })
    }

    fn decode(
        &self,
        input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output> {
        let raw: RawOptimized = structured(&response)?;
        let optimized_content = required_text("optimizedContent", raw.optimized_content)?;

        let length = optimized_content.chars().count();
        if input.platform == PublishPlatform::X && length > X_CHARACTER_LIMIT {
            return Err(GenerationError::malformed(format!(
                "X post is {} characters, limit is {}",
                length, X_CHARACTER_LIMIT
            )));
        }
        Ok(OptimizedContent { optimized_content })
    }
}
