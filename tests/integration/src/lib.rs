//! In-process stand-in for the credential verification service.
//!
//! Serves `/api/v1/verify` and `/api/v1/revoke` over real HTTP on a loopback
//! port so the client is exercised end to end.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use orchard_core::ClientConfig;

/// A request as the service received it.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedRequest {
    pub payload: String,
    pub user_id: String,
    pub mobile_application_id: String,
    pub credential_type: Option<String>,
}

#[derive(Default)]
struct ServiceState {
    /// Payload → decoded fields.
    credentials: HashMap<String, Value>,
    revoked: HashSet<String>,
    verify_log: Vec<ReceivedRequest>,
    revoke_log: Vec<ReceivedRequest>,
}

/// Handle to a running mock service.
#[derive(Clone)]
pub struct MockVerificationService {
    addr: SocketAddr,
    state: Arc<Mutex<ServiceState>>,
}

impl MockVerificationService {
    /// Bind to an ephemeral loopback port and start serving.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(ServiceState::default()));
        let app = Router::new()
            .route("/api/v1/verify", post(handle_verify))
            .route("/api/v1/revoke", post(handle_revoke))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock verification service stopped");
            }
        });
        tracing::debug!(%addr, "mock verification service started");

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client settings pointing at this service.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            timeout_ms: 5_000,
            user_id: "picker-17".into(),
            application_id: "handset-03".into(),
        }
    }

    /// Register a credential the service will recognise.
    pub fn issue(&self, payload: &str, decoded: Value) {
        self.lock().credentials.insert(payload.to_string(), decoded);
    }

    pub fn verify_requests(&self) -> Vec<ReceivedRequest> {
        self.lock().verify_log.clone()
    }

    pub fn revoke_requests(&self) -> Vec<ReceivedRequest> {
        self.lock().revoke_log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServiceState> {
        self.state.lock().expect("mock state poisoned")
    }
}

type Shared = State<Arc<Mutex<ServiceState>>>;

async fn handle_verify(
    State(state): Shared,
    Json(req): Json<ReceivedRequest>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().expect("mock state poisoned");
    state.verify_log.push(req.clone());

    let Some(decoded) = state.credentials.get(&req.payload).cloned() else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "bad signature"})),
        );
    };

    if state.revoked.contains(&req.payload) {
        (
            StatusCode::OK,
            Json(json!({"data": {
                "verified": false,
                "decoded": decoded,
                "deliveryDate": "2025-02-11T08:30:00Z"
            }})),
        )
    } else {
        (
            StatusCode::CREATED,
            Json(json!({"data": {"verified": true, "decoded": decoded}})),
        )
    }
}

async fn handle_revoke(
    State(state): Shared,
    Json(req): Json<ReceivedRequest>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().expect("mock state poisoned");
    state.revoke_log.push(req.clone());

    if !state.credentials.contains_key(&req.payload) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "credential not found"})),
        );
    }
    state.revoked.insert(req.payload);
    (StatusCode::OK, Json(json!({"revoked": true})))
}
