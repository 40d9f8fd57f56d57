//! tracing-subscriber setup for the binary.

use autopx_server::StudioConfig;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbose`. With the `observability` feature, spans are also exported
/// through OpenTelemetry, tagged with `command` and the studio's models and brand.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid.
#[cfg_attr(not(feature = "observability"), allow(unused_variables))]
pub fn init_logging(
    verbose: bool,
    format: LogFormat,
    command: &str,
    config: &StudioConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "observability")]
    {
        crate::observability::init_observability_with_config(
            crate::observability::ObservabilityConfig::new("autopx")
                .with_log_level(default_directive(verbose))
                .with_json_logs(format == LogFormat::Json)
                .with_command(command)
                .with_studio(config),
        )
    }

    #[cfg(not(feature = "observability"))]
    {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_directive(verbose)))?;

        match format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_target(true)
                .init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init(),
        }
        Ok(())
    }
}
