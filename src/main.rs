//! Catalog Backend - token-gated product catalog service
//!
//! Public read/search endpoints over a product collection, admin-only
//! writes, and a JWT-based identity layer in front of both.

use anyhow::{Context, Result};
use catalog_backend::{
    api::create_router,
    auth::{FixedIdentityStore, IdentityStore, TokenService},
    catalog::CatalogStore,
};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "catalogd", about = "Token-gated product catalog service")]
struct Args {
    /// Address to serve the API on
    #[arg(long, env = "CATALOG_BIND_ADDR", default_value = "0.0.0.0:3000")]
    bind_addr: String,

    /// Path to the SQLite catalog database
    #[arg(long, env = "CATALOG_DB_PATH", default_value = "data/catalog.db")]
    db_path: String,

    /// Symmetric secret for signing tokens
    #[arg(long, env = "JWT_SECRET", default_value = "your-secret-key", hide_env_values = true)]
    jwt_secret: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let args = Args::parse();

    if args.jwt_secret == "your-secret-key" {
        warn!("⚠️  Using default JWT secret - set JWT_SECRET in production");
    }

    if let Some(parent) = Path::new(&args.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }
    }

    // An unreachable store is fatal to process start
    let store = Arc::new(CatalogStore::new(&args.db_path)?);
    store
        .seed_sample_products()
        .map_err(|e| anyhow::anyhow!("Failed to seed sample products: {:?}", e))?;

    let identities: Arc<dyn IdentityStore> = Arc::new(FixedIdentityStore::with_defaults()?);
    let tokens = Arc::new(TokenService::new(args.jwt_secret));

    let app = create_router(store, identities, tokens);

    let listener = TcpListener::bind(&args.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind_addr))?;
    info!("🎯 Catalog API listening on {}", args.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter support
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
