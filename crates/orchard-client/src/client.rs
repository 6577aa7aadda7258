use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Serialize;

use orchard_core::{
    ClientConfig, ClientError, CredentialType, RevocationOutcome, RevocationRequest,
    VerificationOutcome, VerificationRequest,
};

use crate::classify::{classify_revocation, classify_verification};
use crate::error::SetupError;

pub const VERIFY_PATH: &str = "/api/v1/verify";
pub const REVOKE_PATH: &str = "/api/v1/revoke";

const PAYLOAD_PREVIEW_CHARS: usize = 50;

/// Client for the credential verification service.
///
/// Each call sends exactly one request and never fails: every answer,
/// including transport errors, is classified into an outcome. Nothing is
/// cached. Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl VerificationClient {
    /// Build a client from validated settings.
    pub fn new(config: ClientConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a scanned payload for verification.
    ///
    /// A missing `credential_type` is forwarded as-is and the service
    /// applies its default.
    pub async fn verify(
        &self,
        payload: &str,
        credential_type: Option<CredentialType>,
    ) -> VerificationOutcome {
        if payload.is_empty() {
            tracing::warn!("refusing to verify an empty payload");
            return VerificationOutcome::Failed(ClientError::InvalidPayload);
        }

        let url = self.config.endpoint(VERIFY_PATH);
        tracing::debug!(
            %url,
            payload = %preview(payload),
            credential_type = ?credential_type,
            "submitting credential for verification"
        );

        let body = VerificationRequest {
            payload: payload.to_string(),
            user_id: self.config.user_id.clone(),
            application_id: self.config.application_id.clone(),
            credential_type,
        };

        let outcome = match self.post(&url, &body).await {
            Ok((status, bytes)) => classify_verification(status, &bytes),
            Err(e) => VerificationOutcome::Failed(e),
        };

        match &outcome {
            VerificationOutcome::Verified(_) => tracing::info!("credential verified"),
            VerificationOutcome::Rejected { .. } => {
                tracing::warn!("credential rejected by verification service")
            }
            VerificationOutcome::Failed(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "verification request failed")
            }
        }
        outcome
    }

    /// Revoke a previously scanned credential.
    pub async fn revoke(
        &self,
        payload: &str,
        credential_type: Option<CredentialType>,
    ) -> RevocationOutcome {
        if payload.is_empty() {
            tracing::warn!("refusing to revoke an empty payload");
            return RevocationOutcome::failed(&ClientError::InvalidPayload);
        }

        let url = self.config.endpoint(REVOKE_PATH);
        tracing::debug!(
            %url,
            payload = %preview(payload),
            credential_type = ?credential_type,
            "submitting credential for revocation"
        );

        let body = RevocationRequest {
            payload: payload.to_string(),
            user_id: self.config.user_id.clone(),
            application_id: self.config.application_id.clone(),
            credential_type,
        };

        match self.post(&url, &body).await {
            Ok((status, bytes)) => {
                let outcome = classify_revocation(status, &bytes);
                if outcome.success {
                    tracing::info!("credential revoked");
                } else {
                    tracing::warn!(status, error = ?outcome.error, "revocation refused");
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "revocation request failed");
                RevocationOutcome::failed(&e)
            }
        }
    }

    /// Send one JSON POST and read the whole answer.
    async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<(u16, Vec<u8>), ClientError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status().as_u16();
        tracing::debug!(status, "verification service responded");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;
        Ok((status, bytes.to_vec()))
    }

    fn transport_error(&self, e: &reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if e.is_builder() {
            ClientError::Unknown(e.to_string())
        } else if e.is_connect() || e.is_request() || e.is_body() || e.is_redirect() {
            ClientError::NetworkUnreachable(e.to_string())
        } else {
            ClientError::Unknown(e.to_string())
        }
    }
}

/// First characters of a payload, for logs.
fn preview(payload: &str) -> String {
    let mut chars = payload.chars();
    let head: String = chars.by_ref().take(PAYLOAD_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
