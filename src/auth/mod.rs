//! Authentication Module
//! Mission: Token-based identity and role authorization for the API

pub mod api;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use api::AuthState;
pub use identity::{CredentialVerifier, FixedIdentityStore, IdentityStore};
pub use jwt::TokenService;
pub use middleware::{require_auth, require_role, AuthError};
