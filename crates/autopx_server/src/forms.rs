//! Raw user forms and their conversion into typed template inputs.
//!
//! Forms accept whatever the caller sent (every field optional, enums as strings) so that a
//! missing or misspelled field becomes a field violation instead of an opaque decode error.

use autopx_core::{PublishPlatform, TargetPlatform, Validate, Violations};
use autopx_error::{ValidationError, ValidationResult};
use autopx_generation::{
    AdjustToneInput, GeneratePostInput, NarrationInput, OptimizeInput, TitlesInput,
    UniversalPostInput,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Run a typed input's own validation and fold its violations into `violations`.
fn absorb(violations: &mut Violations, input: &impl Validate) {
    if let Err(e) = input.validate() {
        for violation in e.violations {
            violations.push(&violation.field, violation.reason);
        }
    }
}

fn parse_choice<T: FromStr>(
    violations: &mut Violations,
    field: &str,
    value: Option<&str>,
    choices: &str,
) -> Option<T> {
    let value = value.map(str::trim).unwrap_or_default();
    match T::from_str(&value.to_ascii_lowercase()) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            violations.push(field, format!("Please select one of: {}.", choices));
            None
        }
    }
}

/// Form behind "generate post".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostForm {
    /// 10-200 characters
    pub topic: Option<String>,
    /// `facebook`, `x` or `both`
    pub platform: Option<String>,
    /// Free text; blank means no preference
    pub tone: Option<String>,
}

impl TryFrom<PostForm> for GeneratePostInput {
    type Error = ValidationError;

    fn try_from(form: PostForm) -> ValidationResult<Self> {
        let mut violations = Violations::default();
        let platform = parse_choice::<TargetPlatform>(
            &mut violations,
            "platform",
            form.platform.as_deref(),
            "facebook, x, both",
        );
        let input = GeneratePostInput::new(
            form.topic.unwrap_or_default(),
            platform.unwrap_or(TargetPlatform::Both),
            form.tone,
        );
        absorb(&mut violations, &input);
        violations.finish()?;
        Ok(input)
    }
}

/// Form behind "generate universal content package".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageForm {
    /// 5-150 characters
    pub topic: Option<String>,
    /// Defaults to true
    pub include_long_form: Option<bool>,
}

impl TryFrom<PackageForm> for UniversalPostInput {
    type Error = ValidationError;

    fn try_from(form: PackageForm) -> ValidationResult<Self> {
        let input = UniversalPostInput::new(form.topic.unwrap_or_default())
            .with_long_form(form.include_long_form.unwrap_or(true));
        input.validate()?;
        Ok(input)
    }
}

/// Form behind "generate audio".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioForm {
    /// Script to narrate
    pub script: Option<String>,
}

impl TryFrom<AudioForm> for NarrationInput {
    type Error = ValidationError;

    fn try_from(form: AudioForm) -> ValidationResult<Self> {
        let input = NarrationInput {
            script: form.script.unwrap_or_default(),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Form behind "adjust tone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToneForm {
    /// Post to rewrite
    pub post_content: Option<String>,
    /// Desired tone
    pub tone: Option<String>,
}

impl TryFrom<ToneForm> for AdjustToneInput {
    type Error = ValidationError;

    fn try_from(form: ToneForm) -> ValidationResult<Self> {
        let input = AdjustToneInput {
            post_content: form.post_content.unwrap_or_default(),
            tone: form.tone.unwrap_or_default(),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Form behind "optimize for platform".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeForm {
    /// Post to optimise
    pub content: Option<String>,
    /// `facebook` or `x`
    pub platform: Option<String>,
}

impl TryFrom<OptimizeForm> for OptimizeInput {
    type Error = ValidationError;

    fn try_from(form: OptimizeForm) -> ValidationResult<Self> {
        let mut violations = Violations::default();
        let platform = parse_choice::<PublishPlatform>(
            &mut violations,
            "platform",
            form.platform.as_deref(),
            "facebook, x",
        );
        let input = OptimizeInput {
            content: form.content.unwrap_or_default(),
            platform: platform.unwrap_or(PublishPlatform::X),
        };
        absorb(&mut violations, &input);
        violations.finish()?;
        Ok(input)
    }
}

/// Form behind "generate titles".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitlesForm {
    /// Post to title
    pub post_content: Option<String>,
    /// `facebook` or `x`
    pub platform: Option<String>,
}

impl TryFrom<TitlesForm> for TitlesInput {
    type Error = ValidationError;

    fn try_from(form: TitlesForm) -> ValidationResult<Self> {
        let mut violations = Violations::default();
        let platform = parse_choice::<PublishPlatform>(
            &mut violations,
            "platform",
            form.platform.as_deref(),
            "facebook, x",
        );
        let input = TitlesInput {
            post_content: form.post_content.unwrap_or_default(),
            platform: platform.unwrap_or(PublishPlatform::X),
        };
        absorb(&mut violations, &input);
        violations.finish()?;
        Ok(input)
    }
}

/// Form behind "suggest hashtags".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagsForm {
    /// Post to suggest hashtags for
    pub content: Option<String>,
}

// Hashtags are mined from an X optimisation of the post.
impl TryFrom<HashtagsForm> for OptimizeInput {
    type Error = ValidationError;

    fn try_from(form: HashtagsForm) -> ValidationResult<Self> {
        let input = OptimizeInput {
            content: form.content.unwrap_or_default(),
            platform: PublishPlatform::X,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Form behind "publish to Facebook" and "publish to X".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishForm {
    /// Post text, sent verbatim
    pub text: Option<String>,
}

/// Validated publish text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishText(String);

impl PublishText {
    /// The text as it will be posted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for PublishText {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.not_blank("text", &self.0);
        violations.finish()
    }
}

impl TryFrom<PublishForm> for PublishText {
    type Error = ValidationError;

    fn try_from(form: PublishForm) -> ValidationResult<Self> {
        let text = PublishText(form.text.unwrap_or_default());
        text.validate()?;
        Ok(text)
    }
}
