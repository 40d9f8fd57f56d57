//! Command-line interface.

mod commands;
mod run;

pub use commands::{Cli, Commands, PlatformArg};
pub use run::{generate_package, generate_post, publish, serve};
