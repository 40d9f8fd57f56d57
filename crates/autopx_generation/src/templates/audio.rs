//! `generate-audio`: narrate a script.

use super::{PromptTemplate, TemplateId};
use crate::wav::{pcm_to_wav, sample_rate_from_mime};
use autopx_core::{GenerateRequest, GenerateResponse, ResponseFormat, Validate, Violations};
use autopx_error::{GenerationError, GenerationResult, ValidationResult};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

/// Input for [`NarrateScript`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationInput {
    /// Text to read aloud
    pub script: String,
}

impl Validate for NarrationInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut violations = Violations::default();
        violations.not_blank("script", &self.script);
        violations.finish()
    }
}

/// Output of [`NarrateScript`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratedAudio {
    /// `data:` URI holding the audio
    pub media: String,
}

/// Reads a script aloud with the backend's speech model.
#[derive(Debug, Clone, Default)]
pub struct NarrateScript {
    voice: Option<String>,
}

impl NarrateScript {
    /// Narrate with a specific prebuilt voice instead of the backend default.
    pub fn with_voice(voice: impl Into<String>) -> Self {
        Self {
            voice: Some(voice.into()),
        }
    }
}

fn is_raw_pcm(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("audio/L16") || essence.eq_ignore_ascii_case("audio/pcm")
}

impl PromptTemplate for NarrateScript {
    const ID: TemplateId = TemplateId::GenerateAudio;
    type Input = NarrationInput;
    type Output = NarratedAudio;

    fn request(&self, input: &Self::Input) -> GenerateRequest {
        GenerateRequest::new(
            input.script.trim(),
            ResponseFormat::Speech {
                voice: self.voice.clone(),
            },
        )
    }

    fn decode(
        &self,
        _input: &Self::Input,
        response: GenerateResponse,
    ) -> GenerationResult<Self::Output> {
        let (mime, data) = response
            .audio()
            .ok_or_else(|| GenerationError::malformed("Backend returned no audio"))?;
        if data.is_empty() {
            return Err(GenerationError::malformed("Backend returned empty audio"));
        }

        let mime = mime.unwrap_or("audio/L16");
        let media = if is_raw_pcm(mime) {
            let wav = pcm_to_wav(data, sample_rate_from_mime(mime));
            format!("data:audio/wav;base64,{}", BASE64.encode(wav))
        } else {
            let essence = mime.split(';').next().unwrap_or(mime).trim();
            format!("data:{};base64,{}", essence, BASE64.encode(data))
        };
        Ok(NarratedAudio { media })
    }
}
