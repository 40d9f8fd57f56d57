//! OpenTelemetry span export.
//!
//! Spans carry the studio's identity as resource attributes: which command ran, which Gemini
//! models served it and which brand the content was written as.

use autopx_server::StudioConfig;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for OpenTelemetry observability.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Enable JSON-formatted logs
    pub json_logs: bool,
    /// Extra resource attributes describing this run
    pub attributes: Vec<(&'static str, String)>,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
            attributes: Vec::new(),
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Record the CLI subcommand this process runs.
    pub fn with_command(mut self, command: &str) -> Self {
        self.attributes.push(("autopx.command", command.to_string()));
        self
    }

    /// Record the models and brand the studio is configured with.
    pub fn with_studio(mut self, config: &StudioConfig) -> Self {
        self.attributes.extend([
            ("autopx.gemini.model", config.gemini().model().clone()),
            (
                "autopx.gemini.speech_model",
                config.gemini().speech_model().clone(),
            ),
            ("autopx.brand", config.brand().name().clone()),
        ]);
        self
    }

    /// Resource attributes other than the service name.
    pub fn resource_attributes(&self) -> Vec<KeyValue> {
        std::iter::once(KeyValue::new(
            "service.version",
            self.service_version.clone(),
        ))
        .chain(
            self.attributes
                .iter()
                .map(|(key, value)| KeyValue::new(*key, value.clone())),
        )
        .collect()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install a subscriber that logs with `fmt` and exports spans to stdout through OpenTelemetry.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(config.resource_attributes())
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(config.service_name.clone());
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    Ok(())
}
