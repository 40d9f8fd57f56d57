//! Command handlers.
//!
//! One-shot commands go through the same action layer as the HTTP API and print JSON: the
//! result on stdout, or the user-facing error on stderr with a failing exit code.

use crate::cli::PlatformArg;
use autopx_error::{AutopxError, AutopxResult, JsonError};
use autopx_server::{
    ActionResult, AppState, PackageForm, PostForm, PublishForm, ServerConfig, StudioConfig,
};
use serde::Serialize;
use serde_json::json;
use std::process::ExitCode;
use tracing::{info, instrument};

fn render<T: Serialize>(value: &T) -> AutopxResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AutopxError::from(JsonError::new("command output", e.to_string())))
}

fn report<T: Serialize>(result: ActionResult<T>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match result {
        Ok(value) => {
            println!("{}", render(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let body = json!({
                "error": e.message(),
                "category": e.category().as_str(),
                "details": e.details(),
            });
            eprintln!("{}", render(&body)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Serve the HTTP API until the process exits.
#[instrument(skip(config))]
pub async fn serve(
    config: StudioConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let server = ServerConfig::new(
        host.unwrap_or_else(|| config.server().host().clone()),
        port.unwrap_or(*config.server().port()),
    );
    let config = config.with_server(server);
    let state = AppState::from_config(&config)?;

    info!(address = %config.server().address(), "Starting autopx studio");
    autopx_server::serve(state, &config.server().address()).await?;
    Ok(ExitCode::SUCCESS)
}

/// Draft posts and print them.
pub async fn generate_post(
    config: &StudioConfig,
    topic: String,
    platform: String,
    tone: Option<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let state = AppState::from_config(config)?;
    let form = PostForm {
        topic: Some(topic),
        platform: Some(platform),
        tone,
    };
    report(state.studio().generate_post(form).await)
}

/// Build a content package and print it.
pub async fn generate_package(
    config: &StudioConfig,
    topic: String,
    no_long_form: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let state = AppState::from_config(config)?;
    let form = PackageForm {
        topic: Some(topic),
        include_long_form: Some(!no_long_form),
    };
    report(state.studio().generate_package(form).await)
}

/// Publish text and print the outcome.
pub async fn publish(
    config: &StudioConfig,
    platform: PlatformArg,
    text: String,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let state = AppState::from_config(config)?;
    let form = PublishForm { text: Some(text) };
    report(state.studio().publish(platform.into(), form).await)
}
