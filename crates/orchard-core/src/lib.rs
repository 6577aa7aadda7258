//! Orchard Core — Credential types, verification outcomes, error taxonomy,
//! and configuration for the orchard credential verifier.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod outcome;
pub mod tag;
pub mod types;

pub use config::{ClientConfig, LoggingConfig, OrchardConfig};
pub use cooldown::ScanCooldown;
pub use error::{ClientError, CoreError, ErrorKind, TagError};
pub use outcome::{FraudWarning, RevocationOutcome, VerificationOutcome, VerificationResponse};
pub use tag::NfcTagData;
pub use types::{
    credential_label, CredentialData, CredentialType, DecodedCredential, RevocationRequest,
    VerificationRequest,
};
