//! Catalog API Endpoints
//! Mission: Public read/search and admin-only write handlers

use crate::api::routes::AppState;
use crate::catalog::models::{Product, ProductDraft};
use crate::catalog::store::CatalogError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

#[derive(Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// GET /products - full collection, public
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, CatalogError> {
    let products = state.store.list_all()?;
    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// GET /products/category/:category - public; "All" means no filter
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ProductsResponse>, CatalogError> {
    let products = state.store.list_by_category(&category)?;
    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// GET /products/search/:query - public free-text search
pub async fn search_products(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<ProductsResponse>, CatalogError> {
    let products = state.store.search(&query)?;
    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// POST /products - admin only
pub async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Value>, CatalogError> {
    let product_id = state.store.insert_one(&draft)?;

    info!("✅ Product added: {} ({})", draft.name, product_id);

    Ok(Json(json!({
        "success": true,
        "message": "Successfully added product",
        "productId": product_id,
    })))
}

/// POST /products/batch - admin only, all-or-nothing
///
/// The body is taken as raw JSON so a non-array shape maps to the same
/// validation envelope as a bad element, not a framework rejection.
pub async fn create_products_batch(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, CatalogError> {
    let drafts: Vec<ProductDraft> = match body {
        Value::Array(_) => serde_json::from_value(body).map_err(|_| {
            CatalogError::Validation("Expected an array of products".to_string())
        })?,
        _ => {
            return Err(CatalogError::Validation(
                "Expected an array of products".to_string(),
            ))
        }
    };

    let inserted_count = state.store.insert_many(&drafts)?;

    info!("✅ Product batch added: {} products", inserted_count);

    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully added {} products", inserted_count),
        "insertedCount": inserted_count,
    })))
}

/// PUT /products/:id - admin only, full replace
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Value>, CatalogError> {
    state.store.update_by_id(&id, &draft)?;

    info!("✏️  Product updated: {}", id);

    Ok(Json(json!({
        "success": true,
        "message": "Successfully updated product",
    })))
}

/// DELETE /products/:id - admin only
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    state.store.delete_by_id(&id)?;

    info!("🗑️  Product deleted: {}", id);

    Ok(Json(json!({
        "success": true,
        "message": "Successfully deleted product",
    })))
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CatalogError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            CatalogError::NotFound => (StatusCode::NOT_FOUND, "Product not found".to_string()),
            CatalogError::Store(err) => {
                // Full detail server-side only; generic message to callers
                error!("Catalog store error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
