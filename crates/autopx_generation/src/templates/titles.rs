//! `generate-titles`: suggest titles for a post.

use super::{PromptTemplate, TemplateId, required_list, schema};
use crate::{render, structured};
use autopx_core::{
    Brand, GenerateRequest, GenerateResponse, PublishPlatform, ResponseFormat, Validate,
    Violations,
};
use autopx_error::{GenerationError, GenerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

/// Maximum title length on X, in characters.
pub const X_TITLE_LIMIT: usize = 60;

const INSTRUCTIONS: &str = "\
You are a Senior AI Educator and Technology Explainer for the brand {{brand}}. Your audience values \
clarity, intelligence, and practical insights about AI.

Your task is to generate 2-3 virality-optimized titles for a social media post for the specified \
platform.

Platform: {{platform}}
Post Content:
\"\"\"
{{post_content}}
\"\"\"

Title Rules:
- ≤ 60 characters for X, and slightly more flexible for Facebook.
- Sound intelligent, not loud or clickbaity.
- Create a cognitive gap or challenge a common belief.
- Be highly relevant to the post content.

Example Titles:
- \"Why Most AI Advice Is Incomplete\"
- \"The Real Function of AI Tools\"
- \"A Better Way to Think About Automation\"

Generate the titles based on the provided content.
";

/// Input for [`GenerateTitles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlesInput {
    /// The post to title
    pub post_content: String,
    /// Platform the titles are for
    pub platform: PublishPlatform,
}

impl Validate for TitlesInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.not_blank("postContent", &self.post_content);
        violations.finish()
    }
}

/// Output of [`GenerateTitles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titles {
    /// Two or three titles
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTitles {
    #[serde(default)]
    titles: Vec<String>,
}

/// Suggests titles in the brand's voice.
#[derive(Debug, Clone, Default)]
pub struct GenerateTitles {
    brand: Brand,
}

impl GenerateTitles {
    /// Titles written as `brand`.
    pub fn new(brand: Brand) -> Self {
        Self { brand }
    }
}

impl PromptTemplate for GenerateTitles {
    const ID: TemplateId = TemplateId::GenerateTitles;
    type Input = TitlesInput;
    type Output = Titles;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        let prompt = render(
            INSTRUCTIONS,
            &[
                ("brand", self.brand.name().as_str()),
                ("platform", input.platform.label()),
                ("post_content", input.post_content.trim()),
            ],
        );
        let schema = schema::object(
            &[("titles", schema::string_array("2-3 generated titles."))],
            &["titles"],
        );
        GenerateRequest::new(prompt, ResponseFormat::Json { schema })
    }

    fn decode(
        &self,
        input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output> {
        let raw: RawTitles = structured(&response)?;
        let titles = required_list("titles", raw.titles, 2, 3)?;

        if input.platform == PublishPlatform::X
            && let Some(long) = titles.iter().find(|t| t.chars().count() > X_TITLE_LIMIT)
        {
            return Err(GenerationError::malformed(format!(
                "Title exceeds {} characters for X: {:?}",
                X_TITLE_LIMIT, long
            )));
        }
        Ok(Titles { titles })
    }
}
