//! `orchard verify` — Verify a scanned credential payload.

use clap::Args;
use std::process::ExitCode;

use orchard_client::VerificationClient;
use orchard_core::{CredentialType, OrchardConfig, VerificationResponse};

use crate::render;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Scanned payload (inline, or `@path` to read it from a file).
    #[arg(short, long)]
    pub payload: String,

    /// Credential type: harvest or delivery. The service default applies when omitted.
    #[arg(short = 't', long)]
    pub credential_type: Option<CredentialType>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &VerifyArgs, config: &OrchardConfig) -> anyhow::Result<ExitCode> {
    let payload = super::read_input(&args.payload)?;
    let client = VerificationClient::new(config.client.clone())?;

    let outcome = client.verify(&payload, args.credential_type).await;
    let verified = outcome.is_verified();

    if args.json {
        let response = VerificationResponse::from(outcome);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for line in render::verification_lines(&outcome, args.credential_type) {
            println!("{}", line);
        }
    }

    Ok(if verified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
