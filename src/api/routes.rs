//! Route Assembly
//! Mission: Wire handlers, gates, and shared state into one router

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::auth::{
    api as auth_api,
    identity::{CredentialVerifier, IdentityStore},
    jwt::TokenService,
    middleware::{require_auth, require_role},
    models::Role,
    AuthState,
};
use crate::catalog::{api as catalog_api, CatalogStore};
use crate::middleware::request_logging;

/// Shared application state for catalog handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
}

/// Create the API router.
///
/// Gate order on protected routes is fixed: the authentication gate is
/// the outermost layer, so claims are always bound before any role
/// gate or handler runs.
pub fn create_router(
    store: Arc<CatalogStore>,
    identities: Arc<dyn IdentityStore>,
    tokens: Arc<TokenService>,
) -> Router {
    let app_state = AppState { store };
    let auth_state = AuthState::new(CredentialVerifier::new(identities), tokens.clone());

    // Public routes - no gate
    let public_routes = Router::new()
        .route("/products", get(catalog_api::list_products))
        .route(
            "/products/category/:category",
            get(catalog_api::list_by_category),
        )
        .route("/products/search/:query", get(catalog_api::search_products))
        .with_state(app_state.clone());

    let login_routes = Router::new()
        .route("/login", post(auth_api::login))
        .with_state(auth_state);

    // Catalog writes and the admin landing page - auth + admin role
    let admin_routes = Router::new()
        .route("/products", post(catalog_api::create_product))
        .route("/products/batch", post(catalog_api::create_products_batch))
        .route("/products/:id", put(catalog_api::update_product))
        .route("/products/:id", delete(catalog_api::delete_product))
        .route("/admin", get(auth_api::admin_area))
        .route_layer(from_fn(require_role(Role::Admin)))
        .route_layer(from_fn_with_state(tokens.clone(), require_auth))
        .with_state(app_state);

    // Any authenticated principal
    let profile_routes = Router::new()
        .route("/profile", get(auth_api::profile))
        .route_layer(from_fn_with_state(tokens.clone(), require_auth));

    // Regular users only
    let user_routes = Router::new()
        .route("/user", get(auth_api::user_area))
        .route_layer(from_fn(require_role(Role::User)))
        .route_layer(from_fn_with_state(tokens, require_auth));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(login_routes)
        .merge(admin_routes)
        .merge(profile_routes)
        .merge(user_routes)
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_logging))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
