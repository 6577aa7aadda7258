//! `orchard tag` — Validate the location data read from an NFC tag.

use clap::Args;
use std::process::ExitCode;

use orchard_core::NfcTagData;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Text of each NDEF record on the tag (inline, or `@path`).
    pub records: Vec<String>,
}

pub fn run(args: &TagArgs) -> anyhow::Result<ExitCode> {
    let records = args
        .records
        .iter()
        .map(|r| super::read_input(r))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match NfcTagData::from_records(&records) {
        Ok(tag) => {
            println!("NFC tag read successfully");
            println!("  NZBN:      {}", tag.nzbn);
            println!("  Location:  {} ({})", tag.location_name, tag.location_id);
            println!("  Bin:       {}", tag.bin_id);
            println!("  Row:       {}", tag.row_id);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Invalid tag: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
