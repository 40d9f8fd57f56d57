//! Runs templates against a generation backend.

use crate::PromptTemplate;
use autopx_core::Validate;
use autopx_error::GenerationResult;
use autopx_interface::GenerationBackend;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};

/// Executes prompt templates against a generation backend.
///
/// Each run validates the input, renders the request, makes exactly one backend call and
/// validates the response. There is no retry, caching or memoisation: two runs with the same
/// input are independent.
#[derive(Clone)]
pub struct ContentGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.backend.provider_name())
            .field("default_model", &self.backend.model_name())
            .finish()
    }
}

impl ContentGenerator {
    /// Create a generator over a backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// The backend every run is sent to.
    pub fn backend(&self) -> &Arc<dyn GenerationBackend> {
        &self.backend
    }

    /// Run one template invocation.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the input fails validation; the backend is not called
    /// - `BackendUnavailable` if the backend call fails
    /// - `MalformedOutput` if the response violates the template's output contract
    pub async fn run<T>(&self, template: &T, input: &T::Input) -> GenerationResult<T::Output>
    where
        T: PromptTemplate,
    {
        let span = info_span!(
            "generate",
            template = T::ID.as_str(),
            provider = self.backend.provider_name(),
            model = tracing::field::Empty,
        );

        async move {
            input.validate()?;

            let request = template.request(input);
            tracing::Span::current().record("model", self.backend.model_for(&request));
            debug!(prompt_chars = request.prompt.chars().count(), "Rendered template");

            let result = match self.backend.generate(&request).await {
                Ok(response) => template.decode(input, response),
                Err(e) => Err(e),
            };

            match &result {
                Ok(_) => info!("Generation succeeded"),
                Err(e) => warn!(category = %e.category(), error = %e, "Generation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
