//! Authentication API Endpoints
//! Mission: Provide login and identity inspection endpoints

use crate::auth::{
    identity::CredentialVerifier,
    jwt::TokenService,
    middleware::AuthError,
    models::{Claims, LoginRequest, LoginResponse, PrincipalInfo},
};
use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub verifier: CredentialVerifier,
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    pub fn new(verifier: CredentialVerifier, tokens: Arc<TokenService>) -> Self {
        Self { verifier, tokens }
    }
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    info!("🔐 Login attempt: {}", payload.username);

    let principal = state
        .verifier
        .authenticate(&payload.username, &payload.secret)
        .map_err(|e| {
            warn!("❌ Failed login attempt: {}", payload.username);
            e
        })?;

    let token = state.tokens.issue(&principal).map_err(|e| {
        warn!("Token issuance failed: {:#}", e);
        AuthError::Internal
    })?;

    info!(
        "✅ Login successful: {} ({})",
        principal.username,
        principal.role.as_str()
    );

    Ok(Json(LoginResponse {
        success: true,
        user: PrincipalInfo::from_principal(&principal),
        token,
    }))
}

/// Current identity - GET /profile (any authenticated principal)
///
/// Built entirely from the verified token claims; no store lookup.
pub async fn profile(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({ "success": true, "user": claims }))
}

/// Admin landing - GET /admin (admin role only)
pub async fn admin_area() -> Json<Value> {
    Json(json!({ "success": true, "message": "Welcome to the admin area!" }))
}

/// User landing - GET /user (user role only)
pub async fn user_area() -> Json<Value> {
    Json(json!({ "success": true, "message": "Welcome to the user area!" }))
}
