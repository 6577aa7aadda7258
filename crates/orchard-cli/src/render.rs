//! Text rendering of outcomes for the terminal.

use chrono::DateTime;
use serde_json::Value;

use orchard_core::{
    credential_label, CredentialType, DecodedCredential, RevocationOutcome, VerificationOutcome,
};

/// `March 1, 2025, 10:00 AM` for RFC 3339 input, the input itself otherwise.
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None => "N/A".to_string(),
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.format("%B %-d, %Y, %I:%M %p").to_string(),
            Err(_) => s.to_string(),
        },
    }
}

/// Label/value rows for the decoded fields that are present.
pub fn decoded_rows(decoded: &DecodedCredential) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    let mut push = |label: &str, value: Option<&String>| {
        if let Some(v) = value {
            rows.push((label.to_string(), v.clone()));
        }
    };

    push("Bin", decoded.bin_identifier.as_ref());
    push("Collection", decoded.collection_id.as_ref());
    push("Row", decoded.row_identifier.as_ref());
    push("Orchard", decoded.orchard_id.as_ref());
    push("NZBN", decoded.nzbn.as_ref());
    push("Issuer", decoded.iss.as_ref());
    push("Subject", decoded.sub.as_ref());
    push("Token", decoded.jti.as_ref());

    match (&decoded.picker_name, &decoded.picker_id) {
        (Some(name), Some(id)) => rows.push(("Picker".into(), format!("{} ({})", name, id))),
        (Some(name), None) => rows.push(("Picker".into(), name.clone())),
        (None, Some(id)) => rows.push(("Picker".into(), id.clone())),
        (None, None) => {}
    }

    if decoded.harvest_start_datetime.is_some() {
        rows.push((
            "Harvest start".into(),
            format_date(decoded.harvest_start_datetime.as_deref()),
        ));
    }
    if decoded.harvest_end_datetime.is_some() {
        rows.push((
            "Harvest end".into(),
            format_date(decoded.harvest_end_datetime.as_deref()),
        ));
    }

    for (key, value) in &decoded.extra {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        rows.push((key.clone(), text));
    }
    rows
}

pub fn verification_lines(
    outcome: &VerificationOutcome,
    credential_type: Option<CredentialType>,
) -> Vec<String> {
    let label = credential_label(credential_type);
    let mut lines = Vec::new();

    match outcome {
        VerificationOutcome::Verified(_) => lines.push(format!("{} credential is VERIFIED", label)),
        VerificationOutcome::Rejected { fraud_warning, .. } => {
            lines.push(format!("{} credential is NOT VERIFIED", label));
            lines.push(format!("  WARNING: {}", fraud_warning.message));
            if let Some(ref date) = fraud_warning.delivery_date {
                lines.push(format!(
                    "  Originally delivered: {}",
                    format_date(Some(date.as_str()))
                ));
            }
        }
        VerificationOutcome::Failed(err) => {
            lines.push("Verification FAILED".to_string());
            lines.push(format!("  {}", err.user_message()));
        }
    }

    if let Some(decoded) = outcome.data().and_then(|d| d.decoded()) {
        lines.push(String::new());
        for (name, value) in decoded_rows(&decoded) {
            lines.push(format!("  {:<14} {}", format!("{}:", name), value));
        }
    }
    lines
}

pub fn revocation_lines(outcome: &RevocationOutcome) -> Vec<String> {
    if outcome.success {
        vec!["Credential REVOKED".to_string()]
    } else {
        vec![
            "Revocation FAILED".to_string(),
            format!(
                "  {}",
                outcome.error.as_deref().unwrap_or(orchard_core::error::UNKNOWN_ERROR_MESSAGE)
            ),
        ]
    }
}
