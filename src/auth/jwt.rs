//! JWT Token Service
//! Mission: Issue and verify signed, time-limited identity tokens

use crate::auth::middleware::AuthError;
use crate::auth::models::{Claims, Principal};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Stateless token service over a shared HS256 secret.
///
/// Tokens are self-contained: verification needs no store lookup or
/// session state, at the cost of no server-side revocation before
/// natural expiry.
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with the standard 1-hour token lifetime.
    pub fn new(secret: String) -> Self {
        Self::with_ttl(secret, Duration::hours(1))
    }

    pub fn with_ttl(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a signed token encoding the principal's id, username, and role.
    pub fn issue(&self, principal: &Principal) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .context("Invalid expiry timestamp")?;

        let claims = Claims {
            sub: principal.id.to_string(),
            username: principal.username.clone(),
            role: principal.role,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        debug!(
            "Issuing token for {} ({}), expires at {}",
            principal.username, principal.id, claims.exp
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// Malformed structure, signature mismatch, and expiry all collapse
    /// into the single `InvalidToken` kind; callers cannot tell which
    /// check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0; // token is invalid the instant exp passes

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}
