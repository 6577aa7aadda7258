//! `orchard revoke` — Revoke a previously scanned credential.

use clap::Args;
use std::process::ExitCode;

use orchard_client::VerificationClient;
use orchard_core::{CredentialType, OrchardConfig};

use crate::render;

#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Payload of the credential to revoke (inline, or `@path`).
    #[arg(short, long)]
    pub payload: String,

    /// Credential type: harvest or delivery.
    #[arg(short = 't', long)]
    pub credential_type: CredentialType,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &RevokeArgs, config: &OrchardConfig) -> anyhow::Result<ExitCode> {
    let payload = super::read_input(&args.payload)?;
    let client = VerificationClient::new(config.client.clone())?;

    let outcome = client.revoke(&payload, Some(args.credential_type)).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in render::revocation_lines(&outcome) {
            println!("{}", line);
        }
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
