//! `orchard init` — Write a default configuration file.

use clap::Args;
use std::process::ExitCode;

use orchard_core::OrchardConfig;

use crate::settings::GlobalArgs;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,

    /// Generate a fresh application instance identifier.
    #[arg(long)]
    pub new_application_id: bool,
}

pub fn run(args: &InitArgs, global: &GlobalArgs) -> anyhow::Result<ExitCode> {
    let path = &global.config;
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = OrchardConfig::default();
    if args.new_application_id {
        config.client.application_id = uuid::Uuid::new_v4().to_string();
    }
    config.save(path)?;

    tracing::info!(path = %path.display(), "wrote default config");
    println!("Wrote {}", path.display());
    println!("  Service:        {}", config.client.base_url);
    println!("  Application ID: {}", config.client.application_id);
    Ok(ExitCode::SUCCESS)
}
