//! Shared application state.

use crate::{Studio, StudioConfig};
use autopx_error::AutopxResult;
use autopx_generation::ContentGenerator;
use autopx_models::GeminiClient;
use autopx_social::{FacebookCredentials, FacebookPlatform, XClient, XCredentials, XPlatform};
use std::sync::Arc;
use tracing::{info, instrument};

/// Immutable state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    studio: Arc<Studio>,
}

impl AppState {
    /// Wrap an assembled studio.
    pub fn new(studio: Studio) -> Self {
        Self {
            studio: Arc::new(studio),
        }
    }

    /// Build the production studio: Gemini backend, Facebook and X adapters, credentials from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no Gemini API key is set, or an HTTP error if a client
    /// cannot be initialized. Missing platform credentials are not an error here.
    #[instrument(skip_all)]
    pub fn from_config(config: &StudioConfig) -> AutopxResult<Self> {
        let backend = GeminiClient::new(config.gemini().clone())?;
        let generator = ContentGenerator::new(Arc::new(backend));

        let facebook = FacebookPlatform::new(
            FacebookCredentials::from_env(),
            config.facebook().graph_url().clone(),
        )?;
        let x = XPlatform::new(Arc::new(XClient::new(
            XCredentials::from_env(),
            config.x().api_url().clone(),
        )?));

        info!(
            model = %config.gemini().model(),
            facebook_configured = facebook.credentials().is_complete(),
            "Studio ready"
        );

        Ok(Self::new(Studio::new(
            generator,
            config.brand().clone(),
            Arc::new(facebook),
            Arc::new(x),
        )))
    }

    /// The action layer.
    pub fn studio(&self) -> &Studio {
        &self.studio
    }
}
