//! `generate-universal-post`: a complete educational content package.

use super::{PromptTemplate, TemplateId, required_list, required_text, schema};
use crate::{render, structured};
use autopx_core::{Brand, GenerateRequest, GenerateResponse, ResponseFormat, Validate, Violations};
use autopx_error::{GenerationError, GenerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

/// Minimum topic length, in characters.
pub const TOPIC_MIN: usize = 5;
/// Maximum topic length, in characters.
pub const TOPIC_MAX: usize = 150;

const INSTRUCTIONS: &str = "\
You are a Senior AI Educator, Systems Thinker, and Technology Explainer creating faceless, \
high-retention educational content for a global audience named {{brand}}.

You explain complex AI and tech concepts in a way that:
- Feels obvious after hearing it
- Makes the viewer feel smarter
- Encourages replays, saves, and shares

You do not chase trends.
You create timeless clarity.

Virality Engineering Principles (MANDATORY)
Every piece of content MUST satisfy at least 4 of the following 6:
1. Pattern Interruption – Open with a statement that challenges a common belief
2. Cognitive Gap – Create curiosity that demands resolution
3. Compression – Explain something big in very few words
4. Utility – Viewer learns something usable immediately
5. Status Transfer – Viewer feels more intelligent after watching
6. Rewatch Value – Dense enough to watch twice

Hook Rules (Critical)
The first sentence must:
- Be ≤ 12 words
- Contain a contradiction, insight, or reframing
- Never ask a question
- Never say “Did you know”
- Never say “In this video”

Approved Hook Patterns:
- “Most people misunderstand how AI actually works.”
- “AI doesn’t replace jobs. It replaces a specific behavior.”
- “The problem with most AI tools is not the technology.”

Content Structure (Short-Form: 30–60s)
1. Hook (0–3s): A precise, disruptive insight.
2. Reframe (3–10s): Explain why the common belief is incomplete or wrong.
3. Insight (10–40s): Deliver one clear mental model or principle.
4. Practical Takeaway (last 10s): Something the viewer can apply immediately.
No fluff. No storytelling. No hype.
{{long_form_section}}
Titles (Virality-Optimized)
Generate 2-3 titles per topic.

Rules:
- ≤ 60 characters
- No emojis
- No clickbait words (INSANE, SHOCKING, SECRET)
- Must sound intelligent, not loud

Examples:
- “Why Most AI Advice Is Incomplete”
- “The Real Function of AI Tools”
- “A Better Way to Think About Automation”

Hashtags
Generate 4-5 relevant hashtags. One of these MUST be {{hashtag}}.

Captions (Retention-Driven)
On-screen captions must:
- Be sentence-based
- Appear every 2–3 seconds
- Reinforce clarity, not repeat audio
- Highlight key reframes

Avoid:
- Word-by-word captions
- Decorative text

Descriptions / Post Copy
- One paragraph summary
- One subtle depth signal (e.g. “This is part of a larger framework…”)
- One soft continuation cue (e.g. “More detailed breakdowns available for supporters.”)
- No aggressive calls to action.

Topic Authority Zones
You may generate content on:
- AI mental models
- Tool selection frameworks
- Automation logic
- Productivity with AI
- Solo-builder systems
- AI misconceptions
- Future of work (non-speculative)
- Practical AI workflows
- Why tools fail
- Why people misuse AI

Avoid:
- News
- Drama
- Tool hype
- Tutorials requiring visuals unless requested

Brand Personality Constraints
Always sound: Calm, Precise, Analytical, Confident
Never sound: Motivational, Emotional, Salesy, Trend-driven

Your social media name is {{brand}}.

Your task is to generate a complete content package based on the following topic.

Topic: {{topic}}

Return the response in the structured JSON format defined by the output schema.
";

const LONG_FORM_SECTION: &str = "
Long-Form Content (2–4 minutes)
Must:
- Expand the same core idea
- Add one additional framework or example
- Be suitable for Patreon or book chapters
- Avoid platform-specific slang
";

fn default_include_long_form() -> bool {
    true
}

/// Input for [`UniversalPost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalPostInput {
    /// What the package is about
    pub topic: String,
    /// Whether to write a 2-4 minute long-form script as well
    #[serde(default = "default_include_long_form")]
    pub include_long_form: bool,
}

impl UniversalPostInput {
    /// Input with the long-form script included.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            include_long_form: true,
        }
    }

    /// Toggle the long-form script.
    pub fn with_long_form(mut self, include_long_form: bool) -> Self {
        self.include_long_form = include_long_form;
        self
    }
}

impl Validate for UniversalPostInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.length("topic", self.topic.trim(), TOPIC_MIN, TOPIC_MAX);
        violations.finish()
    }
}

/// Output of [`UniversalPost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPackage {
    /// Two or three titles
    pub titles: Vec<String>,
    /// Four or five hashtags, always including the brand hashtag
    pub hashtags: Vec<String>,
    /// 30-60 second script
    pub short_form_script: String,
    /// 2-4 minute script, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form_script: Option<String>,
    /// Sentence-based captions
    pub on_screen_captions: Vec<String>,
    /// Post copy
    pub post_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackage {
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    short_form_script: Option<String>,
    #[serde(default)]
    long_form_script: Option<String>,
    #[serde(default)]
    on_screen_captions: Vec<String>,
    #[serde(default)]
    post_description: Option<String>,
}

/// Generates a full content package in the brand's voice.
#[derive(Debug, Clone, Default)]
pub struct UniversalPost {
    brand: Brand,
}

impl UniversalPost {
    /// Packages written as `brand`.
    pub fn new(brand: Brand) -> Self {
        Self { brand }
    }

    /// The persona packages are written as.
    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    fn hashtags(&self, raw: Vec<String>) -> GenerationResult<Vec<String>> {
        let hashtags: Vec<String> = required_list("hashtags", raw, 4, 5)?
            .into_iter()
            .map(|tag| {
                if tag.starts_with('#') {
                    tag
                } else {
                    format!("#{}", tag)
                }
            })
            .collect();

        if !hashtags.iter().any(|tag| self.brand.matches_hashtag(tag)) {
            return Err(GenerationError::malformed(format!(
                "hashtags do not include {}",
                self.brand.hashtag()
            )));
        }
        Ok(hashtags)
    }
}

impl PromptTemplate for UniversalPost {
    const ID: TemplateId = TemplateId::GenerateUniversalPost;
    type Input = UniversalPostInput;
    type Output = ContentPackage;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        let long_form_section = if input.include_long_form {
            LONG_FORM_SECTION
        } else {
            ""
        };
        let prompt = render(
            INSTRUCTIONS,
            &[
                ("brand", self.brand.name().as_str()),
                ("hashtag", self.brand.hashtag().as_str()),
                ("long_form_section", long_form_section),
                ("topic", input.topic.trim()),
            ],
        );

        let mut required = vec![
            "titles",
            "hashtags",
            "shortFormScript",
            "onScreenCaptions",
            "postDescription",
        ];
        if input.include_long_form {
            required.push("longFormScript");
        }
        let hashtag_description = format!(
            "4-5 relevant hashtags, including {}.",
            self.brand.hashtag()
        );
        let schema = schema::object(
            &[
                ("titles", schema::string_array("2-3 virality-optimized titles.")),
                ("hashtags", schema::string_array(&hashtag_description)),
                (
                    "shortFormScript",
                    schema::string("A 30-60 second script for short-form video."),
                ),
                (
                    "longFormScript",
                    schema::string(
                        "A 2-4 minute script for long-form video. Only include if requested.",
                    ),
                ),
                (
                    "onScreenCaptions",
                    schema::string_array(
                        "Sentence-based on-screen captions appearing every 2-3 seconds.",
                    ),
                ),
                (
                    "postDescription",
                    schema::string(
                        "A post description with a summary, depth signal, and continuation cue.",
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
        let raw: RawPackage = structured(&response)?;

        let long_form_script = if input.include_long_form {
            Some(required_text("longFormScript", raw.long_form_script)?)
        } else {
            None
        };

        Ok(ContentPackage {
            titles: required_list("titles", raw.titles, 2, 3)?,
            hashtags: self.hashtags(raw.hashtags)?,
            short_form_script: required_text("shortFormScript", raw.short_form_script)?,
            long_form_script,
            on_screen_captions: required_list(
                "onScreenCaptions",
                raw.on_screen_captions,
                1,
                usize::MAX,
            )?,
            post_description: required_text("postDescription", raw.post_description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form_section_follows_flag() {
        let template = UniversalPost::default();
        let with = template.request(&UniversalPostInput::new("AI mental models"));
        assert!(with.prompt.contains("Long-Form Content (2–4 minutes)"));

        let without =
            template.request(&UniversalPostInput::new("AI mental models").with_long_form(false));
        assert!(!without.prompt.contains("Long-Form Content"));
        assert!(without.prompt.contains("One of these MUST be #peterdamianoHQ."));
    }

    #[test]
    fn test_include_long_form_defaults_to_true() {
        let input: UniversalPostInput =
            serde_json::from_value(serde_json::json!({"topic": "Why tools fail"})).unwrap();
        assert!(input.include_long_form);
    }

    #[test]
    fn test_topic_bounds() {
        assert!(UniversalPostInput::new("AI").validate().is_err());
        assert!(UniversalPostInput::new("a".repeat(151)).validate().is_err());
        assert!(UniversalPostInput::new("Automation logic").validate().is_ok());
    }
}
