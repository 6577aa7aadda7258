//! Orchard Client — Submits scanned credential payloads to the verification
//! service and classifies every answer into a typed outcome.

pub mod classify;
pub mod client;
pub mod error;

pub use classify::{classify_revocation, classify_verification, error_for_status};
pub use client::{VerificationClient, REVOKE_PATH, VERIFY_PATH};
pub use error::SetupError;
