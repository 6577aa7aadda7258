//! Mapping of the verification service's HTTP answers onto outcomes.
//!
//! Only 200 and 201 count as success. Everything else is a [`ClientError`],
//! so callers never look at status codes or body shapes themselves.

use serde_json::Value;

use orchard_core::{ClientError, CredentialData, RevocationOutcome, VerificationOutcome};

pub(crate) fn is_accepted(status: u16) -> bool {
    status == 200 || status == 201
}

/// Classify the answer to a verification request.
pub fn classify_verification(status: u16, body: &[u8]) -> VerificationOutcome {
    if !is_accepted(status) {
        return VerificationOutcome::Failed(error_for_status(status, body));
    }

    let mut value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return malformed(status, format!("body is not JSON: {}", e)),
    };

    // `data` is passed through untouched; only its shape and the `verified`
    // flag decide the outcome.
    let data = match value.get_mut("data").map(Value::take) {
        Some(Value::Object(fields)) => CredentialData::from(fields),
        Some(_) => return malformed(status, "`data` is not an object"),
        None => return malformed(status, "missing `data` object"),
    };

    // Only an explicit `false` is a rejection; a missing or odd flag is not.
    if data.is_rejected() {
        VerificationOutcome::rejected(data)
    } else {
        VerificationOutcome::Verified(data)
    }
}

/// Classify the answer to a revocation request. The body of an accepted
/// revocation is ignored.
pub fn classify_revocation(status: u16, body: &[u8]) -> RevocationOutcome {
    if is_accepted(status) {
        RevocationOutcome::revoked()
    } else {
        RevocationOutcome::failed(&error_for_status(status, body))
    }
}

/// Error for a status other than 200/201.
pub fn error_for_status(status: u16, body: &[u8]) -> ClientError {
    if status >= 400 {
        ClientError::Http {
            status,
            message: body_message(body),
        }
    } else {
        ClientError::MalformedResponse {
            status,
            detail: "unexpected status".into(),
        }
    }
}

/// The body's `error` field, else its `message` field. Empty strings and
/// non-string values are skipped.
fn body_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn malformed(status: u16, detail: impl Into<String>) -> VerificationOutcome {
    VerificationOutcome::Failed(ClientError::MalformedResponse {
        status,
        detail: detail.into(),
    })
}
