//! Orchard CLI — Command-line front end for the credential verifier.
//!
//! Subcommands: init, config, verify, revoke, tag.

mod commands;
mod render;
mod settings;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use settings::GlobalArgs;

/// Orchard — verify harvest and delivery credentials.
#[derive(Parser, Debug)]
#[command(name = "orchard", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Print the effective configuration.
    Config(commands::config::ConfigArgs),
    /// Verify a scanned credential payload.
    Verify(commands::verify::VerifyArgs),
    /// Revoke a previously scanned credential.
    Revoke(commands::revoke::RevokeArgs),
    /// Validate NFC tag data.
    Tag(commands::tag::TagArgs),
}

impl Commands {
    /// `init` writes the config file, so it must not depend on reading it.
    fn reads_config(&self) -> bool {
        !matches!(self, Commands::Init(_))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.command.reads_config() {
        cli.global.resolve()?
    } else {
        cli.global.defaults()
    };
    settings::init_tracing(&config.logging);

    match &cli.command {
        Commands::Init(args) => commands::init::run(args, &cli.global),
        Commands::Config(args) => commands::config::run(args, &config),
        Commands::Verify(args) => commands::verify::run(args, &config).await,
        Commands::Revoke(args) => commands::revoke::run(args, &config).await,
        Commands::Tag(args) => commands::tag::run(args),
    }
}
