use std::fmt;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timed out. Please try again.";
pub const API_ERROR_MESSAGE: &str = "Verification failed. Please try again.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const INVALID_PAYLOAD_MESSAGE: &str =
    "Invalid QR code format. Please scan a valid credential QR code.";
pub const VERIFICATION_REJECTED_MESSAGE: &str = "Credential verification failed";
pub const FRAUD_WARNING_MESSAGE: &str = "This credential could not be verified.";

/// Core errors: parsing, configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown credential type: {0}")]
    UnknownCredentialType(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Classification of a failed verification or revocation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NetworkUnreachable,
    Timeout,
    HttpClientOrServerError,
    MalformedResponse,
    VerificationRejected,
    InvalidPayload,
    UnknownError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkUnreachable => "network_unreachable",
            Self::Timeout => "timeout",
            Self::HttpClientOrServerError => "http_error",
            Self::MalformedResponse => "malformed_response",
            Self::VerificationRejected => "verification_rejected",
            Self::InvalidPayload => "invalid_payload",
            Self::UnknownError => "unknown_error",
        };
        f.write_str(name)
    }
}

/// A request-level failure of the verification client.
///
/// `Display` carries the technical detail for logs; [`ClientError::user_message`]
/// is what gets shown to a person.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("verification service unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Status >= 400. `message` is the body's `error` or `message` field.
    #[error("verification service returned HTTP {status}")]
    Http { status: u16, message: Option<String> },

    /// A status the contract does not cover, or a 200/201 body without a
    /// `data` object.
    #[error("malformed response (HTTP {status}): {detail}")]
    MalformedResponse { status: u16, detail: String },

    #[error("empty scan payload")]
    InvalidPayload,

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkUnreachable(_) => ErrorKind::NetworkUnreachable,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Http { .. } => ErrorKind::HttpClientOrServerError,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::InvalidPayload => ErrorKind::InvalidPayload,
            Self::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    /// Human-readable message for the person holding the scanner.
    pub fn user_message(&self) -> &str {
        match self {
            Self::NetworkUnreachable(_) => NETWORK_ERROR_MESSAGE,
            Self::Timeout { .. } => TIMEOUT_ERROR_MESSAGE,
            Self::Http {
                message: Some(message),
                ..
            } => message.as_str(),
            Self::Http { message: None, .. } | Self::MalformedResponse { .. } => API_ERROR_MESSAGE,
            Self::InvalidPayload => INVALID_PAYLOAD_MESSAGE,
            Self::Unknown(_) => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

/// Errors reading NFC tag data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("the NFC tag appears to be empty")]
    Empty,

    #[error("tag record is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("tag record is missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid NFC tag data format")]
    InvalidData,
}
