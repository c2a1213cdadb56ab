//! Access Control Middleware
//! Mission: Gate routes on token identity and required role

use crate::auth::jwt::TokenService;
use crate::auth::models::{Claims, Role};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;

/// Authentication gate.
///
/// Extracts `Authorization: Bearer <token>`, verifies it, and binds the
/// decoded claims into the request extensions for downstream gates and
/// handlers. Missing/malformed header is 401; a present token that
/// fails verification is 403.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = tokens.verify(&token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Authorization gate, parameterized by the required role.
///
/// Must be layered inside `require_auth`; applying it to a route with
/// no authentication gate is a programming error and panics rather
/// than silently passing.
pub fn require_role(
    required: Role,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let role = match req.extensions().get::<Claims>() {
                Some(claims) => claims.role,
                None => panic!("require_role applied to a route without require_auth"),
            };

            if role != required {
                warn!(
                    "Role check failed: has '{}', route requires '{}'",
                    role.as_str(),
                    required.as_str()
                );
                return AuthError::InsufficientPermissions.into_response();
            }

            next.run(req).await
        })
    }
}

/// Auth error kinds surfaced at the request boundary.
///
/// Each kind is deliberately coarse: no distinction between unknown
/// user and wrong secret, nor between malformed, forged, and expired
/// tokens.
#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    InsufficientPermissions,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Access token required"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid or expired token"),
            AuthError::InsufficientPermissions => {
                (StatusCode::FORBIDDEN, "Insufficient permissions")
            }
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
