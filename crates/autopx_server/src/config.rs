//! Layered studio configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from autopx.toml)
//! - `~/.config/autopx/autopx.toml`
//! - `./autopx.toml`, or an explicit file passed by the caller
//! - `AUTOPX__SECTION__KEY` environment variables
//!
//! Credentials are read from the environment by the adapters and never appear here.

use autopx_core::Brand;
use autopx_error::{AutopxError, AutopxResult, ConfigError};
use autopx_models::GeminiConfig;
use autopx_social::{GRAPH_API_URL, X_API_URL};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../autopx.toml");

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    host: String,
    /// Port to bind
    port: u16,
}

impl ServerConfig {
    /// Create a server section.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

/// `[facebook]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct FacebookConfig {
    /// Graph API root
    graph_url: String,
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            graph_url: GRAPH_API_URL.to_string(),
        }
    }
}

/// `[x]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct XConfig {
    /// X API root
    api_url: String,
}

impl Default for XConfig {
    fn default() -> Self {
        Self {
            api_url: X_API_URL.to_string(),
        }
    }
}

/// Top-level autopx configuration.
///
/// # Example
///
/// ```no_run
/// use autopx_server::StudioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StudioConfig::load()?;
/// println!("Serving on {}", config.server().address());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct StudioConfig {
    /// HTTP server settings
    server: ServerConfig,
    /// Generation backend settings
    gemini: GeminiConfig,
    /// Facebook adapter settings
    facebook: FacebookConfig,
    /// X adapter settings
    x: XConfig,
    /// Persona the educational templates write as
    brand: Brand,
}

impl StudioConfig {
    /// Load configuration from a single file, ignoring every other source.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AutopxResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AutopxError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;
        deserialize(config)
    }

    /// Load configuration with the standard precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    pub fn load() -> AutopxResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration with the standard precedence, replacing `./autopx.toml` with
    /// `override_path` when given. An explicit file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any present file cannot be parsed.
    #[instrument]
    pub fn load_with(override_path: Option<&Path>) -> AutopxResult<Self> {
        debug!("Loading configuration with precedence: env > file > home dir > bundled defaults");

        let mut builder = bundled();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/autopx/autopx.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match override_path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("autopx").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("AUTOPX")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| {
            AutopxError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;
        deserialize(config)
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> AutopxResult<Self> {
        let config = bundled().build().map_err(|e| {
            AutopxError::from(ConfigError::new(format!(
                "Failed to read bundled configuration: {}",
                e
            )))
        })?;
        deserialize(config)
    }

    /// Replace the server section (CLI flags).
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }
}

fn bundled() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn deserialize(config: Config) -> AutopxResult<StudioConfig> {
    config.try_deserialize().map_err(|e| {
        AutopxError::from(ConfigError::new(format!(
            "Failed to parse configuration: {}",
            e
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_matches_defaults() {
        let config = StudioConfig::bundled().unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.server().address(), "127.0.0.1:8080");
        assert_eq!(config.brand().hashtag(), "#peterdamianoHQ");
    }
}
