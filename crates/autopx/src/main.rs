//! autopx CLI binary.
//!
//! - Serve the JSON HTTP API
//! - Draft posts and content packages from the terminal
//! - Publish text to Facebook or X

use autopx::{
    LogFormat, StudioConfig,
    cli::{Cli, Commands, generate_package, generate_post, publish, serve},
    init_logging,
};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Credentials may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    let config = StudioConfig::load_with(cli.config.as_deref())?;
    init_logging(cli.verbose, format, cli.command.name(), &config)?;

    match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Post {
            topic,
            platform,
            tone,
        } => generate_post(&config, topic, platform, tone).await,
        Commands::Package {
            topic,
            no_long_form,
        } => generate_package(&config, topic, no_long_form).await,
        Commands::Publish { platform, text } => publish(&config, platform, text).await,
    }
}
