//! Authentication Models
//! Mission: Define principal, role, and token claim data structures

use serde::{Deserialize, Serialize};

/// A known identity capable of authenticating.
///
/// The principal set is fixed at process start; there is no runtime
/// user management in this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub secret_hash: String, // bcrypt hash - never serialize
    pub role: Role,
}

impl Principal {
    pub fn new(id: i64, username: &str, secret_hash: String, role: Role) -> Self {
        Self {
            id,
            username: username.to_string(),
            secret_hash,
            role,
        }
    }
}

/// Roles for RBAC - fixed two-role model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin, // Full access, including catalog writes
    #[serde(rename = "user")]
    User, // Authenticated read access only
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (principal id)
    pub username: String,
    pub role: Role,
    pub iat: usize, // issued-at timestamp
    pub exp: usize, // expiration timestamp
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub secret: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: PrincipalInfo,
    pub token: String,
}

/// Principal response (sanitized - no secret material)
#[derive(Debug, Serialize)]
pub struct PrincipalInfo {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl PrincipalInfo {
    pub fn from_principal(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username.clone(),
            role: principal.role,
        }
    }
}
