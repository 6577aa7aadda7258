//! Results of verification and revocation calls, and the uniform response
//! shape handed to presentation layers.

use serde::{Deserialize, Serialize};

use crate::error::{
    ClientError, ErrorKind, FRAUD_WARNING_MESSAGE, VERIFICATION_REJECTED_MESSAGE,
};
use crate::types::CredentialData;

/// Warning attached to a credential the service recognised but refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudWarning {
    pub detected: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
}

impl FraudWarning {
    /// Warning for rejected `data`, carrying its delivery date if any.
    pub fn for_rejected(data: &CredentialData) -> Self {
        Self {
            detected: true,
            message: FRAUD_WARNING_MESSAGE.to_string(),
            delivery_date: data.delivery_date().map(str::to_string),
        }
    }
}

/// Outcome of a verification call. Exactly one of three states.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// The service verified the credential.
    Verified(CredentialData),
    /// The request succeeded but the service refused the credential. The
    /// decoded data is kept alongside the rejection.
    Rejected {
        data: CredentialData,
        fraud_warning: FraudWarning,
    },
    /// No usable answer from the service.
    Failed(ClientError),
}

impl VerificationOutcome {
    /// Build the rejected state for `data`.
    pub fn rejected(data: CredentialData) -> Self {
        let fraud_warning = FraudWarning::for_rejected(&data);
        Self::Rejected {
            data,
            fraud_warning,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }

    pub fn data(&self) -> Option<&CredentialData> {
        match self {
            Self::Verified(data) | Self::Rejected { data, .. } => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn fraud_warning(&self) -> Option<&FraudWarning> {
        match self {
            Self::Rejected { fraud_warning, .. } => Some(fraud_warning),
            _ => None,
        }
    }

    /// Message for the user, `None` when verified.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Verified(_) => None,
            Self::Rejected { .. } => Some(VERIFICATION_REJECTED_MESSAGE),
            Self::Failed(err) => Some(err.user_message()),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Verified(_) => None,
            Self::Rejected { .. } => Some(ErrorKind::VerificationRejected),
            Self::Failed(err) => Some(err.kind()),
        }
    }
}

/// Uniform shape of a verification result for presentation layers:
/// `{success, data, error?, fraudWarning?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub success: bool,
    pub data: Option<CredentialData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_warning: Option<FraudWarning>,
}

impl From<VerificationOutcome> for VerificationResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Verified(data) => Self {
                success: true,
                data: Some(data),
                error: None,
                fraud_warning: None,
            },
            VerificationOutcome::Rejected {
                data,
                fraud_warning,
            } => Self {
                success: false,
                data: Some(data),
                error: Some(VERIFICATION_REJECTED_MESSAGE.to_string()),
                fraud_warning: Some(fraud_warning),
            },
            VerificationOutcome::Failed(err) => Self {
                success: false,
                data: None,
                error: Some(err.user_message().to_string()),
                fraud_warning: None,
            },
        }
    }
}

/// Outcome of a revocation call. Never carries a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RevocationOutcome {
    pub fn revoked() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(err: &ClientError) -> Self {
        Self {
            success: false,
            error: Some(err.user_message().to_string()),
        }
    }
}
