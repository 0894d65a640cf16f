//! # REST API
//!
//! Builds the axum router that exposes keyforge over HTTP. All endpoints
//! share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                     | Description                          |
//! |--------|--------------------------|--------------------------------------|
//! | GET    | `/health`                | Liveness check                       |
//! | POST   | `/wallets/predetermined` | Derive a predetermined wallet        |
//! | POST   | `/keys/import`           | Import a `suiprivkey1…` key          |
//! | POST   | `/signatures/verify`     | Verify an ownership signature        |
//!
//! Every failure uses the same envelope: `{"success": false, "error": …,
//! "requestId": …}`. Client mistakes are 400s with the real reason. Anything
//! else is a 500 with a generic message and the details only in the log,
//! keyed by `requestId`.
//!
//! Request bodies may carry private keys. Handlers never log a body, and
//! error messages come from the protocol crate, which never embeds key bytes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use keyforge_protocol::config::CONTEXT_ALLOWLIST_CREATION;
use keyforge_protocol::crypto::{verify_hex, SignatureError};
use keyforge_protocol::wallet::{from_inputs, import_private_key};
use keyforge_protocol::{ErrorKind, WalletError};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone. There is deliberately nothing mutable in here besides
/// metrics: every derivation is a pure function of its request.
#[derive(Clone)]
pub struct AppState {
    /// The reported version string.
    pub version: String,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/wallets/predetermined", post(predetermined_wallet_handler))
        .route("/keys/import", post(import_key_handler))
        .route("/signatures/verify", post(verify_signature_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body of `POST /wallets/predetermined`.
///
/// Fields are optional at the serde level so a missing field gets our 400
/// envelope instead of axum's plain-text rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredeterminedWalletRequest {
    pub hashed_email: Option<String>,
    pub contract_id: Option<String>,
    pub context: Option<String>,
}

/// Response of `POST /wallets/predetermined`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredeterminedWalletResponse {
    pub success: bool,
    pub predetermined_address: String,
    pub method: String,
    pub contract_id: String,
}

/// Body of `POST /keys/import`. No `Debug`: it holds a private key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportKeyRequest {
    pub private_key: Option<String>,
}

/// Response of `POST /keys/import`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportKeyResponse {
    pub success: bool,
    pub address: String,
    pub public_key: String,
    pub scheme: String,
}

/// Body of `POST /signatures/verify`. `message` is signed as its UTF-8 bytes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySignatureRequest {
    pub public_key: Option<String>,
    pub message: Option<String>,
    pub signature: Option<String>,
}

/// Response of `POST /signatures/verify`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifySignatureResponse {
    pub success: bool,
    pub valid: bool,
}

/// Error envelope returned by every endpoint on failure.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub request_id: String,
}

// ---------------------------------------------------------------------------
// Error Mapping
// ---------------------------------------------------------------------------

/// A request failure, ready to render.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: &'static str,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            kind: "input_validation",
        }
    }

    /// Metric label for this failure.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Metric label for an [`ErrorKind`].
fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InputValidation => "input_validation",
        ErrorKind::Decode => "decode",
        ErrorKind::UnsupportedScheme => "unsupported_scheme",
        ErrorKind::InvalidSeedLength => "invalid_seed_length",
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        let kind = err.kind();
        if kind.is_client_error() {
            Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                kind: kind_label(kind),
            }
        } else {
            tracing::error!(error = %err, "internal derivation failure");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "internal error".into(),
                kind: kind_label(kind),
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("invalid request body: {}", rejection.body_text()),
            kind: "malformed_body",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        tracing::warn!(
            %request_id,
            status = self.status.as_u16(),
            kind = self.kind,
            error = %self.message,
            "request failed"
        );
        let body = ErrorResponse {
            success: false,
            error: self.message,
            request_id,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Pull a required string field, treating empty as missing.
fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(format!("missing required field: {name}"))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health`: returns 200 if the process is alive.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.version,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `POST /wallets/predetermined`: derive the address a recipient will own.
///
/// Field presence and the context label are checked here, before the
/// protocol crate is invoked.
async fn predetermined_wallet_handler(
    State(state): State<AppState>,
    body: Result<Json<PredeterminedWalletRequest>, JsonRejection>,
) -> Response {
    const ROUTE: &str = "/wallets/predetermined";
    match derive_predetermined(&state, body) {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => {
            state.metrics.record_failure(ROUTE, err.kind());
            err.into_response()
        }
    }
}

fn derive_predetermined(
    state: &AppState,
    body: Result<Json<PredeterminedWalletRequest>, JsonRejection>,
) -> Result<PredeterminedWalletResponse, ApiError> {
    let Json(req) = body?;
    let hashed_email = required(req.hashed_email, "hashedEmail")?;
    let contract_id = required(req.contract_id, "contractId")?;
    let context = required(req.context, "context")?;

    if context != CONTEXT_ALLOWLIST_CREATION {
        return Err(ApiError::bad_request(format!(
            "unsupported context: expected {CONTEXT_ALLOWLIST_CREATION}"
        )));
    }

    let started = Instant::now();
    let wallet = from_inputs(&hashed_email, &contract_id, &context)?;
    state
        .metrics
        .derivation_latency_seconds
        .observe(started.elapsed().as_secs_f64());
    state.metrics.wallets_derived_total.inc();

    tracing::info!(
        address = %wallet.address,
        contract_id = %wallet.contract_id,
        "predetermined wallet derived"
    );

    Ok(PredeterminedWalletResponse {
        success: true,
        predetermined_address: wallet.address.to_string(),
        method: wallet.method.to_string(),
        contract_id: wallet.contract_id,
    })
}

/// `POST /keys/import`: decode an exported key and report its address.
async fn import_key_handler(
    State(state): State<AppState>,
    body: Result<Json<ImportKeyRequest>, JsonRejection>,
) -> Response {
    const ROUTE: &str = "/keys/import";
    match import_key(&state, body) {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => {
            state.metrics.record_failure(ROUTE, err.kind());
            err.into_response()
        }
    }
}

fn import_key(
    state: &AppState,
    body: Result<Json<ImportKeyRequest>, JsonRejection>,
) -> Result<ImportKeyResponse, ApiError> {
    let Json(req) = body?;
    let private_key = required(req.private_key, "privateKey")?;

    let imported = import_private_key(private_key.trim())?;
    state.metrics.keys_imported_total.inc();

    tracing::info!(address = %imported.address, "private key imported");

    Ok(ImportKeyResponse {
        success: true,
        address: imported.address.to_string(),
        public_key: imported.public_key.to_hex(),
        scheme: imported.scheme.to_string(),
    })
}

/// `POST /signatures/verify`: check that `publicKey` signed `message`.
///
/// A well-formed signature that doesn't verify is `valid: false` with a 200.
/// Only unparseable hex is a 400.
async fn verify_signature_handler(
    State(state): State<AppState>,
    body: Result<Json<VerifySignatureRequest>, JsonRejection>,
) -> Response {
    const ROUTE: &str = "/signatures/verify";
    match verify_signature(body) {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => {
            state.metrics.record_failure(ROUTE, err.kind());
            err.into_response()
        }
    }
}

fn verify_signature(
    body: Result<Json<VerifySignatureRequest>, JsonRejection>,
) -> Result<VerifySignatureResponse, ApiError> {
    let Json(req) = body?;
    let public_key = required(req.public_key, "publicKey")?;
    let message = req
        .message
        .ok_or_else(|| ApiError::bad_request("missing required field: message"))?;
    let signature = required(req.signature, "signature")?;

    let valid = match verify_hex(&public_key, message.as_bytes(), &signature) {
        Ok(()) => true,
        Err(SignatureError::VerificationFailed) => false,
        Err(SignatureError::Malformed(e)) => return Err(ApiError::bad_request(e.to_string())),
    };

    tracing::debug!(public_key = %public_key, valid, "signature checked");

    Ok(VerifySignatureResponse {
        success: true,
        valid,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
