//! Identity Store & Credential Verifier
//! Mission: Resolve principals by username and verify login credentials

use crate::auth::middleware::AuthError;
use crate::auth::models::{Principal, Role};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use tracing::warn;

/// Lookup capability for known principals.
///
/// Injected into the credential verifier so a persisted user backend
/// can be substituted without touching the verification logic.
pub trait IdentityStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;
}

/// In-memory identity store, read-only after construction.
pub struct FixedIdentityStore {
    principals: Vec<Principal>,
}

impl FixedIdentityStore {
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { principals }
    }

    /// Build the demo principal set: admin/1234 and user/1234.
    ///
    /// Secrets are stored as bcrypt hashes; the login contract is still
    /// exact-match on username and secret.
    pub fn with_defaults() -> Result<Self> {
        let principals = vec![
            Principal::new(
                1,
                "admin",
                hash("1234", DEFAULT_COST).context("Failed to hash admin secret")?,
                Role::Admin,
            ),
            Principal::new(
                2,
                "user",
                hash("1234", DEFAULT_COST).context("Failed to hash user secret")?,
                Role::User,
            ),
        ];

        warn!("⚠️  Using built-in demo credentials - replace the identity store in production");

        Ok(Self::new(principals))
    }
}

impl IdentityStore for FixedIdentityStore {
    fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self
            .principals
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }
}

/// Checks a username/secret pair against the identity store.
#[derive(Clone)]
pub struct CredentialVerifier {
    identities: Arc<dyn IdentityStore>,
}

impl CredentialVerifier {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Verify credentials and return the matching principal.
    ///
    /// Unknown username, wrong secret, and store lookup failures all
    /// collapse into `InvalidCredentials` so callers cannot enumerate
    /// usernames. No side effects.
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<Principal, AuthError> {
        let principal = match self.identities.find_by_username(username) {
            Ok(Some(principal)) => principal,
            Ok(None) => return Err(AuthError::InvalidCredentials),
            Err(e) => {
                warn!("Identity store lookup failed for login: {:#}", e);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let valid = verify(secret, &principal.secret_hash).unwrap_or(false);
        if valid {
            Ok(principal)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
