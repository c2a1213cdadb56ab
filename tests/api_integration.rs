//! End-to-end tests over the assembled router: login, gate chain, and
//! catalog operations through the HTTP surface.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_backend::{
    api::create_router,
    auth::{
        models::{Principal, Role},
        FixedIdentityStore, IdentityStore, TokenService,
    },
    catalog::CatalogStore,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::util::ServiceExt;

// Low bcrypt cost keeps these tests fast; the login contract is unchanged.
fn test_app() -> (Router, NamedTempFile) {
    let temp = NamedTempFile::new().unwrap();
    let store = Arc::new(CatalogStore::new(temp.path().to_str().unwrap()).unwrap());
    store.seed_sample_products().unwrap();

    let identities: Arc<dyn IdentityStore> = Arc::new(FixedIdentityStore::new(vec![
        Principal::new(1, "admin", bcrypt::hash("1234", 4).unwrap(), Role::Admin),
        Principal::new(2, "user", bcrypt::hash("1234", 4).unwrap(), Role::User),
    ]));
    let tokens = Arc::new(TokenService::new("integration-secret".to_string()));

    (create_router(store, identities, tokens), temp)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn login(app: &Router, username: &str, secret: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": username, "secret": secret })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], username);
    body["token"].as_str().unwrap().to_string()
}

fn sample_product() -> Value {
    json!({
        "name": "Headphones",
        "description": "Noise-cancelling over-ear headphones",
        "category": "Electronics",
        "image": "https://example.com/headphones.png",
        "price": 149.99
    })
}

#[tokio::test]
async fn admin_can_create_product_end_to_end() {
    let (app, _temp) = test_app();
    let token = login(&app, "admin", "1234").await;

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/products", Some(&token), Some(sample_product())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let product_id = body["productId"].as_str().unwrap().to_string();
    assert!(!product_id.is_empty());

    // The new product is visible on the public listing
    let (status, body) = send(&app, json_request(Method::GET, "/products", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert!(products.iter().any(|p| p["id"] == product_id.as_str()));
}

#[tokio::test]
async fn user_role_cannot_write_catalog() {
    let (app, _temp) = test_app();
    let token = login(&app, "user", "1234").await;

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/products", Some(&token), Some(sample_product())),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Insufficient permissions");

    // But the user-only area works
    let (status, body) = send(&app, json_request(Method::GET, "/user", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the user area!");

    // And the admin area does not
    let (status, _) = send(&app, json_request(Method::GET, "/admin", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_role_cannot_enter_user_area() {
    let (app, _temp) = test_app();
    let token = login(&app, "admin", "1234").await;

    let (status, body) = send(&app, json_request(Method::GET, "/admin", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the admin area!");

    // Role check is exact equality, not a hierarchy
    let (status, _) = send(&app, json_request(Method::GET, "/user", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_and_invalid_tokens_are_distinct() {
    let (app, _temp) = test_app();

    // No Authorization header at all
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/products", None, Some(sample_product())),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");

    // Present but unverifiable token
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/products",
            Some("garbage.token.here"),
            Some(sample_product()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _temp) = test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "admin", "secret": "wrong" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");

    // Unknown username gets the identical envelope
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "nobody", "secret": "1234" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn profile_reflects_token_claims() {
    let (app, _temp) = test_app();
    let token = login(&app, "user", "1234").await;

    let (status, body) = send(&app, json_request(Method::GET, "/profile", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "user");
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn public_reads_need_no_token() {
    let (app, _temp) = test_app();

    let (status, body) = send(&app, json_request(Method::GET, "/products", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 6);

    // "All" sentinel equals the unfiltered listing
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/products/category/All", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 6);

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/products/category/Books", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    // Case-insensitive substring search
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/products/search/shirt", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "T-Shirt");
}

#[tokio::test]
async fn batch_insert_is_all_or_nothing() {
    let (app, _temp) = test_app();
    let token = login(&app, "admin", "1234").await;

    // One invalid element rejects the whole batch
    let batch = json!([
        sample_product(),
        { "description": "no name", "category": "Electronics", "image": "https://example.com/x.png" }
    ]);
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/products/batch", Some(&token), Some(batch)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("name"));

    let (_, body) = send(&app, json_request(Method::GET, "/products", None, None)).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 6); // only the seed data

    // Non-array body is a validation failure, not a framework error
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/products/batch",
            Some(&token),
            Some(sample_product()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Expected an array of products");

    // A fully valid batch commits every element
    let batch = json!([sample_product(), sample_product()]);
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/products/batch", Some(&token), Some(batch)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insertedCount"], 2);
}

#[tokio::test]
async fn update_and_delete_report_not_found() {
    let (app, _temp) = test_app();
    let token = login(&app, "admin", "1234").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/products/no-such-id",
            Some(&token),
            Some(sample_product()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, _) = send(
        &app,
        json_request(Method::DELETE, "/products/no-such-id", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let (app, _temp) = test_app();
    let token = login(&app, "admin", "1234").await;

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/products", Some(&token), Some(sample_product())),
    )
    .await;
    let id = body["productId"].as_str().unwrap().to_string();

    let mut updated = sample_product();
    updated["price"] = json!(99.99);
    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/products/{}", id),
            Some(&token),
            Some(updated),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully updated product");

    let (status, body) = send(
        &app,
        json_request(Method::DELETE, &format!("/products/{}", id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully deleted product");

    let (_, body) = send(&app, json_request(Method::GET, "/products", None, None)).await;
    assert!(!body["products"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == id.as_str()));
}

#[tokio::test]
async fn expired_token_is_rejected_at_the_gate() {
    let temp = NamedTempFile::new().unwrap();
    let store = Arc::new(CatalogStore::new(temp.path().to_str().unwrap()).unwrap());

    let identities: Arc<dyn IdentityStore> = Arc::new(FixedIdentityStore::new(vec![
        Principal::new(1, "admin", bcrypt::hash("1234", 4).unwrap(), Role::Admin),
    ]));
    // Tokens from this service are already expired when issued
    let tokens = Arc::new(TokenService::with_ttl(
        "integration-secret".to_string(),
        chrono::Duration::seconds(-10),
    ));
    let app = create_router(store, identities, tokens.clone());

    let principal = Principal::new(1, "admin", String::new(), Role::Admin);
    let token = tokens.issue(&principal).unwrap();

    let (status, body) = send(&app, json_request(Method::GET, "/profile", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");
}
