//! `adjust-tone`: rewrite a post in a different tone.

use super::{PromptTemplate, TemplateId, required_text, schema};
use crate::{render, structured};
use autopx_core::{GenerateRequest, GenerateResponse, ResponseFormat, Validate, Violations};
use autopx_error::{GenerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

const INSTRUCTIONS: &str = "\
You are an expert social media manager. Rewrite the following social media post so that it reads \
in the requested tone. Keep the meaning, the facts and any hashtags or links intact, and keep the \
length roughly the same.

Tone: {{tone}}

Post Content:
\"\"\"
{{post_content}}
\"\"\"
";

/// Input for [`AdjustTone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustToneInput {
    /// The post to rewrite
    pub post_content: String,
    /// Desired tone (e.g. formal, casual, humorous)
    pub tone: String,
}

impl Validate for AdjustToneInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations
            .not_blank("postContent", &self.post_content)
            .not_blank("tone", &self.tone);
        violations.finish()
    }
}

/// Output of [`AdjustTone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedTone {
    /// The rewritten post
    pub adjusted_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdjusted {
    #[serde(default)]
    adjusted_content: Option<String>,
}

/// Rewrites a post in a requested tone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustTone;

impl PromptTemplate for AdjustTone {
    const ID: TemplateId = TemplateId::AdjustTone;
    type Input = AdjustToneInput;
    type Output = AdjustedTone;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        let prompt = render(
            INSTRUCTIONS,
            &[
                ("tone", input.tone.trim()),
                ("post_content", input.post_content.trim()),
            ],
        );
        let schema = schema::object(
            &[(
                "adjustedContent",
                schema::string("The post rewritten in the requested tone."),
            )],
            &["adjustedContent"],
        );
        GenerateRequest::new(prompt, ResponseFormat::Json { schema })
    }

    fn decode(
        &self,
        _input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output> {
        let raw: RawAdjusted = structured(&response)?;
        Ok(AdjustedTone {
            adjusted_content: required_text("adjustedContent", raw.adjusted_content)?,
        })
    }
}
