//! Layered settings: config file, then `ORCHARD_*` environment, then flags.

use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use orchard_core::{LoggingConfig, OrchardConfig};

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "orchard.toml", global = true)]
    pub config: PathBuf,

    /// Override the verification service base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn resolve(&self) -> anyhow::Result<OrchardConfig> {
        let mut config = OrchardConfig::load(&self.config)?;
        config.apply_env()?;

        if let Some(ref base_url) = self.base_url {
            config.client.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.client.timeout_ms = timeout_ms;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }

    /// Built-in defaults plus the log level flag. Reads neither the config
    /// file nor the environment.
    pub fn defaults(&self) -> OrchardConfig {
        let mut config = OrchardConfig::default();
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        config
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so `--json` output stays machine-readable.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
