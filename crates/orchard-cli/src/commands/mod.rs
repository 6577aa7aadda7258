pub mod config;
pub mod init;
pub mod revoke;
pub mod tag;
pub mod verify;

use anyhow::Context;
use std::path::Path;

/// Read an argument given either inline or as `@path`.
pub fn read_input(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let contents = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading {}", path))?;
            Ok(contents.trim_end_matches(&['\r', '\n'][..]).to_string())
        }
        None => Ok(arg.to_string()),
    }
}
