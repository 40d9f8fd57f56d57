//! `generate-post`: draft posts for Facebook, X, or both.

use super::{PromptTemplate, TemplateId, required_text, schema};
use crate::{render, structured};
use autopx_core::{
    GenerateRequest, GenerateResponse, PublishPlatform, ResponseFormat, TargetPlatform, Validate,
    Violations,
};
use autopx_error::{GenerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

/// Minimum topic length, in characters.
pub const TOPIC_MIN: usize = 10;
/// Maximum topic length, in characters.
pub const TOPIC_MAX: usize = 200;

const INSTRUCTIONS: &str = "\
You are an expert social media manager. Generate one or more engaging social media posts based on \
the provided topic, platform, and tone.

Topic: {{topic}}
{{tone_line}}
Your task is to generate content for the following platform(s): {{platform}}.

- If the platform is 'facebook', create a Facebook post.
- If the platform is 'x', create an X (formerly Twitter) post.
- If the platform is 'both', create both a Facebook and an X post.

Please adhere to the specific platform conventions. For X, be concise and use relevant hashtags. \
For Facebook, you can be more detailed.
";

/// Input for [`GeneratePost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePostInput {
    /// What the post is about
    pub topic: String,
    /// Which platform(s) to draft for
    pub platform: TargetPlatform,
    /// Desired tone (e.g. "Casual", "Professional")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl GeneratePostInput {
    /// Create an input; blank tones are treated as absent.
    pub fn new(topic: impl Into<String>, platform: TargetPlatform, tone: Option<String>) -> Self {
        Self {
            topic: topic.into(),
            platform,
            tone: tone.filter(|tone| !tone.trim().is_empty()),
        }
    }
}

impl Validate for GeneratePostInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.length("topic", self.topic.trim(), TOPIC_MIN, TOPIC_MAX);
        if let Some(tone) = &self.tone {
            violations.not_blank("tone", tone);
        }
        violations.finish()
    }
}

/// Drafted posts, shaped by the requested platform.
///
/// Serialises as `{"facebookPost": ..}`, `{"xPost": ..}` or both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum GeneratedPosts {
    /// Facebook only
    Facebook {
        /// Facebook post text
        facebook_post: String,
    },
    /// X only
    X {
        /// X post text
        x_post: String,
    },
    /// One draft per platform
    Both {
        /// Facebook post text
        facebook_post: String,
        /// X post text
        x_post: String,
    },
}

impl GeneratedPosts {
    /// Draft for a single platform, if one was requested.
    pub fn post_for(&self, platform: PublishPlatform) -> Option<&str> {
        match (self, platform) {
            (Self::Facebook { facebook_post }, PublishPlatform::Facebook)
            | (Self::Both { facebook_post, .. }, PublishPlatform::Facebook) => {
                Some(facebook_post.as_str())
            }
            (Self::X { x_post }, PublishPlatform::X)
            | (Self::Both { x_post, .. }, PublishPlatform::X) => Some(x_post.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosts {
    #[serde(default)]
    facebook_post: Option<String>,
    #[serde(default)]
    x_post: Option<String>,
}

/// Drafts social media posts from a topic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratePost;

impl PromptTemplate for GeneratePost {
    const ID: TemplateId = TemplateId::GeneratePost;
    type Input = GeneratePostInput;
    type Output = GeneratedPosts;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        let tone_line = input
            .tone
            .as_deref()
            .map(|tone| format!("Tone: {}\n", tone.trim()))
            .unwrap_or_default();
        let platform = input.platform.to_string();
        let prompt = render(
            INSTRUCTIONS,
            &[
                ("topic", input.topic.trim()),
                ("tone_line", tone_line.as_str()),
                ("platform", platform.as_str()),
            ],
        );

        let mut required = Vec::new();
        if input.platform.includes(PublishPlatform::Facebook) {
            required.push("facebookPost");
        }
        if input.platform.includes(PublishPlatform::X) {
            required.push("xPost");
        }
        let schema = schema::object(
            &[
                (
                    "facebookPost",
                    schema::string(
                        "The generated Facebook post. Only include if platform is \"facebook\" or \"both\".",
                    ),
                ),
                (
                    "xPost",
                    schema::string(
                        "The generated X (Twitter) post. Only include if platform is \"x\" or \"both\".",
                    ),
                ),
            ],
            &required,
        );

        GenerateRequest::new(prompt, ResponseFormat::Json { schema })
    }

    fn decode(
        &self,
        input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output> {
        let raw: RawPosts = structured(&response)?;
        let posts = match input.platform {
            TargetPlatform::Facebook => GeneratedPosts::Facebook {
                facebook_post: required_text("facebookPost", raw.facebook_post)?,
            },
            TargetPlatform::X => GeneratedPosts::X {
                x_post: required_text("xPost", raw.x_post)?,
            },
            TargetPlatform::Both => GeneratedPosts::Both {
                facebook_post: required_text("facebookPost", raw.facebook_post)?,
                x_post: required_text("xPost", raw.x_post)?,
            },
        };
        Ok(posts)
    }
}
