//! CLI command definitions.

use autopx_core::PublishPlatform;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// autopx - turn a topic into social posts, narrate scripts, publish to Facebook and X
#[derive(Parser, Debug)]
#[command(name = "autopx")]
#[command(about = "Turn a topic into social posts and publish them to Facebook and X", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file to use instead of ./autopx.toml
    #[arg(long, global = true, env = "AUTOPX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the JSON HTTP API
    Serve {
        /// Interface to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides [server] port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Draft posts for a topic
    Post {
        /// What the post is about (10-200 characters)
        topic: String,

        /// facebook, x or both
        #[arg(long, default_value = "both")]
        platform: String,

        /// Desired tone, e.g. Casual or Professional
        #[arg(long)]
        tone: Option<String>,
    },

    /// Build a universal content package for a topic
    Package {
        /// What the package is about (5-150 characters)
        topic: String,

        /// Skip the long-form video script
        #[arg(long)]
        no_long_form: bool,
    },

    /// Publish text to a platform
    Publish {
        /// Where to publish
        platform: PlatformArg,

        /// Text to post, verbatim
        text: String,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serve { .. } => "serve",
            Self::Post { .. } => "post",
            Self::Package { .. } => "package",
            Self::Publish { .. } => "publish",
        }
    }
}

/// Publishing target
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Facebook Page
    Facebook,
    /// X
    X,
}

impl From<PlatformArg> for PublishPlatform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Facebook => PublishPlatform::Facebook,
            PlatformArg::X => PublishPlatform::X,
        }
    }
}
