//! Integration test: scan → verify → revoke → re-verify against a live
//! HTTP service, using orchard-client and orchard-core together.

use serde_json::json;
use std::time::{Duration, Instant};

use orchard_client::VerificationClient;
use orchard_core::{
    CredentialType, ErrorKind, NfcTagData, RevocationOutcome, ScanCooldown, VerificationOutcome,
    VerificationResponse,
};
use orchard_integration_tests::MockVerificationService;

const HARVEST_TOKEN: &str = "eyJhbGciOiJFZERTQSJ9.signed-harvest-token";
const DELIVERY_TOKEN: &str = "eyJhbGciOiJFZERTQSJ9.signed-delivery-token";

async fn setup() -> (MockVerificationService, VerificationClient) {
    let service = MockVerificationService::start().await;
    service.issue(
        HARVEST_TOKEN,
        json!({
            "iss": "did:web:orchard.example.nz",
            "binIdentifier": "BIN-01",
            "rowIdentifier": "R12",
            "nzbn": "123456789",
            "pickerName": "Aroha",
            "pickerId": "P-7",
            "harvestStartDatetime": "2025-03-01T07:00:00Z",
            "jti": "tok-1"
        }),
    );
    service.issue(
        DELIVERY_TOKEN,
        json!({
            "iss": "did:web:orchard.example.nz",
            "nzbn": "123456789",
            "collectionId": "COL-5",
            "driverName": "Mere",
            "deliveryDatetime": "2025-03-02T16:45:00Z"
        }),
    );
    let client = VerificationClient::new(service.client_config()).expect("client");
    (service, client)
}

// =========================================================================
// Verification
// =========================================================================

#[tokio::test]
async fn test_verify_harvest_credential() {
    let (service, client) = setup().await;

    let outcome = client
        .verify(HARVEST_TOKEN, Some(CredentialType::Harvest))
        .await;
    assert!(outcome.is_verified());

    let body = serde_json::to_value(VerificationResponse::from(outcome)).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["verified"], true);
    assert_eq!(body["data"]["decoded"]["binIdentifier"], "BIN-01");
    assert_eq!(body["data"]["decoded"]["nzbn"], "123456789");
    assert!(body.get("error").is_none());

    let requests = service.verify_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].payload, HARVEST_TOKEN);
    assert_eq!(requests[0].user_id, "picker-17");
    assert_eq!(requests[0].mobile_application_id, "handset-03");
    assert_eq!(
        requests[0].credential_type.as_deref(),
        Some("OrgPartHarvertCredential")
    );
}

#[tokio::test]
async fn test_verify_delivery_credential_keeps_delivery_fields() {
    let (service, client) = setup().await;

    let outcome = client
        .verify(DELIVERY_TOKEN, Some(CredentialType::Delivery))
        .await;
    let decoded = outcome
        .data()
        .and_then(|d| d.decoded())
        .expect("decoded delivery credential");

    assert_eq!(decoded.collection_id.as_deref(), Some("COL-5"));
    assert!(decoded.bin_identifier.is_none());
    assert!(decoded.picker_name.is_none());
    assert_eq!(decoded.extra["driverName"], "Mere");
    assert_eq!(
        service.verify_requests()[0].credential_type.as_deref(),
        Some("DeliveryCredential")
    );
}

#[tokio::test]
async fn test_verify_without_type_forwards_absence() {
    let (service, client) = setup().await;

    let outcome = client.verify(HARVEST_TOKEN, None).await;
    assert!(outcome.is_verified());
    assert!(service.verify_requests()[0].credential_type.is_none());
}

#[tokio::test]
async fn test_unknown_credential_reports_service_message() {
    let (_service, client) = setup().await;

    let outcome = client
        .verify("not-a-credential", Some(CredentialType::Harvest))
        .await;
    assert_eq!(
        outcome.error_kind(),
        Some(ErrorKind::HttpClientOrServerError)
    );
    assert_eq!(outcome.error_message(), Some("bad signature"));

    let response = VerificationResponse::from(outcome);
    assert!(!response.success);
    assert!(response.data.is_none());
    assert!(response.fraud_warning.is_none());
}

// =========================================================================
// Revocation and re-verification
// =========================================================================

#[tokio::test]
async fn test_revoke_then_verify_is_rejected_with_data() {
    let (service, client) = setup().await;

    let first = client
        .verify(HARVEST_TOKEN, Some(CredentialType::Harvest))
        .await;
    assert!(first.is_verified());

    let revoked = client
        .revoke(HARVEST_TOKEN, Some(CredentialType::Harvest))
        .await;
    assert_eq!(revoked, RevocationOutcome::revoked());
    assert_eq!(service.revoke_requests().len(), 1);

    // Same inputs, second round trip: the server's new state must show.
    let second = client
        .verify(HARVEST_TOKEN, Some(CredentialType::Harvest))
        .await;
    match &second {
        VerificationOutcome::Rejected {
            data,
            fraud_warning,
        } => {
            assert!(fraud_warning.detected);
            assert_eq!(
                fraud_warning.delivery_date.as_deref(),
                Some("2025-02-11T08:30:00Z")
            );
            let decoded = data.decoded().expect("decoded kept on rejection");
            assert_eq!(decoded.bin_identifier.as_deref(), Some("BIN-01"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(service.verify_requests().len(), 2);

    let body = serde_json::to_value(VerificationResponse::from(second)).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Credential verification failed");
    assert_eq!(body["fraudWarning"]["detected"], true);
    assert_eq!(body["data"]["decoded"]["pickerName"], "Aroha");
}

#[tokio::test]
async fn test_revoke_unknown_credential() {
    let (_service, client) = setup().await;

    let outcome = client
        .revoke("never-issued", Some(CredentialType::Delivery))
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("credential not found"));

    let body = serde_json::to_value(&outcome).unwrap();
    assert!(body.get("data").is_none());
}

// =========================================================================
// No caching, concurrency
// =========================================================================

#[tokio::test]
async fn test_identical_calls_are_independent_round_trips() {
    let (service, client) = setup().await;

    for _ in 0..3 {
        let outcome = client
            .verify(DELIVERY_TOKEN, Some(CredentialType::Delivery))
            .await;
        assert!(outcome.is_verified());
    }
    assert_eq!(service.verify_requests().len(), 3);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let (service, client) = setup().await;

    let calls = (0..8).map(|i| {
        let client = client.clone();
        let payload = if i % 2 == 0 { HARVEST_TOKEN } else { DELIVERY_TOKEN };
        async move { client.verify(payload, None).await }
    });
    let outcomes = futures::future::join_all(calls).await;

    assert!(outcomes.iter().all(VerificationOutcome::is_verified));
    assert_eq!(service.verify_requests().len(), 8);
}

// =========================================================================
// Caller-side scan handling
// =========================================================================

#[tokio::test]
async fn test_scan_cooldown_suppresses_duplicate_submissions() {
    let (service, client) = setup().await;
    let mut cooldown = ScanCooldown::default();
    let t0 = Instant::now();

    // A QR code held in front of the camera fires several decode events.
    for offset_ms in [0u64, 120, 480, 900, 1_050] {
        if cooldown.try_accept_at(t0 + Duration::from_millis(offset_ms)) {
            client
                .verify(HARVEST_TOKEN, Some(CredentialType::Harvest))
                .await;
        }
    }
    assert_eq!(service.verify_requests().len(), 2);
}

#[tokio::test]
async fn test_unreachable_service_is_classified() {
    let service = MockVerificationService::start().await;
    let mut config = service.client_config();
    config.base_url = "http://127.0.0.1:9".into();
    let client = VerificationClient::new(config).expect("client");

    let outcome = client.verify(HARVEST_TOKEN, None).await;
    assert_eq!(outcome.error_kind(), Some(ErrorKind::NetworkUnreachable));

    let revoked = client.revoke(HARVEST_TOKEN, None).await;
    assert!(!revoked.success);
}

#[test]
fn test_nfc_tag_is_independent_of_verification() {
    let tag = NfcTagData::from_records([
        "plain text record",
        r#"{"nzbn":"123456789","location_id":"LOC-3","location_name":"Block C","bin_id":"BIN-01","row_id":"R12"}"#,
    ])
    .expect("tag data");
    assert_eq!(tag.bin_id, "BIN-01");
}
