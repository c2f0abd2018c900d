#![deny(missing_docs)]
//! The HTTP boundary of the PKI-backed 2FA service.
//!
//! Exposes three operations over the core: submit an encrypted seed for
//! decryption and storage, fetch the current TOTP code, and verify a
//! candidate code. Decryption failures are reported uniformly so the
//! service cannot be used as a decryption oracle.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use log::{error, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use twofa_core::crypto;
use twofa_core::keys::{self, RsaPrivateKey};
use twofa_core::seed_store::SeedStore;
use twofa_core::totp;

/// Shared application state
#[derive(Clone)]
struct AppState {
    key: Option<Arc<RsaPrivateKey>>,
    store: SeedStore,
}

#[derive(Deserialize)]
struct DecryptSeedRequest {
    encrypted_seed: String,
}

#[derive(Deserialize)]
struct VerifyCodeRequest {
    code: String,
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_KEY_PATH: &str = "student_private.pem";
const DEFAULT_SEED_PATH: &str = "/data/seed.txt";

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = env::var("TWOFA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let key_path = env::var("TWOFA_KEY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_KEY_PATH));
    let seed_path = env::var("TWOFA_SEED_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SEED_PATH));

    // A missing key is not fatal: the service starts and every decrypt
    // request answers 500 until the key file exists. Every use site checks
    // for the key, so nothing downstream can touch a missing one.
    let key = match keys::load_private_key(&key_path) {
        Ok(key) => {
            println!("Private key loaded from {}", key_path.display());
            Some(Arc::new(key))
        }
        Err(e) => {
            warn!("Starting without a private key: {e}");
            None
        }
    };

    let app_state = Arc::new(AppState {
        key,
        store: SeedStore::new(seed_path),
    });
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on:");
    println!("  - http://127.0.0.1:{port}/generate-2fa");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decrypt-seed", post(decrypt_seed_handler))
        .route("/generate-2fa", get(generate_code_handler))
        .route("/verify-2fa", post(verify_code_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// The one body returned for every decryption or storage failure. Which
/// stage rejected the ciphertext is logged server-side only.
fn decryption_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Decryption failed or storage error occurred." })),
    )
}

fn seed_missing_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Seed not decrypted yet or seed storage unavailable." })),
    )
}

/// Accepts the Base64 encrypted seed, decrypts it and stores the hex seed.
async fn decrypt_seed_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DecryptSeedRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(key) = state.key.as_deref() else {
        error!("Cannot decrypt: private key is not loaded.");
        return decryption_error();
    };

    let stored = crypto::decrypt_seed(&payload.encrypted_seed, key)
        .and_then(|seed| state.store.write(&seed));
    match stored {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            error!("Decryption or storage error: {e}");
            decryption_error()
        }
    }
}

/// Reads the stored seed and returns the current code plus its remaining
/// validity in seconds.
async fn generate_code_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let seed = match state.store.read() {
        Ok(Some(seed)) => seed,
        Ok(None) => {
            warn!("2FA code requested before a seed was stored.");
            return seed_missing_error();
        }
        Err(e) => {
            error!("Seed store read failed: {e}");
            return seed_missing_error();
        }
    };

    match totp::current_code(&seed) {
        Ok((code, valid_for)) => (
            StatusCode::OK,
            Json(json!({ "code": code, "valid_for": valid_for })),
        ),
        Err(e) => {
            error!("TOTP generation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "TOTP generation failed." })),
            )
        }
    }
}

/// Verifies a candidate code against the stored seed with one period of
/// tolerance on each side.
async fn verify_code_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyCodeRequest>,
) -> (StatusCode, Json<Value>) {
    // Client-input error, rejected before the seed or engine is touched.
    if !totp::is_candidate_well_formed(&payload.code) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid code format. Must be a 6-digit string." })),
        );
    }

    let seed = match state.store.read() {
        Ok(Some(seed)) => seed,
        Ok(None) => {
            warn!("2FA verification requested before a seed was stored.");
            return seed_missing_error();
        }
        Err(e) => {
            error!("Seed store read failed: {e}");
            return seed_missing_error();
        }
    };

    match totp::verify(&seed, &payload.code, totp::DEFAULT_WINDOW) {
        Ok(valid) => (StatusCode::OK, Json(json!({ "valid": valid }))),
        Err(e) => {
            error!("TOTP verification failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "TOTP verification failed." })),
            )
        }
    }
}
