//! `orchard config` — Print the effective configuration.

use clap::Args;
use std::process::ExitCode;

use orchard_core::OrchardConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only check the client settings; print nothing on success.
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: &ConfigArgs, config: &OrchardConfig) -> anyhow::Result<ExitCode> {
    config.client.validate()?;
    if !args.check {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(ExitCode::SUCCESS)
}
