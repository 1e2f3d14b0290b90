//! Outbound ports: collaborators the identity services delegate to
//!
//! Password hashing, token issuance and event publication are contracts here;
//! the concrete adapters live in `infrastructure::crypto` and
//! `application::events`.

use serde::{Deserialize, Serialize};

use crate::domain::events::UserUpdatedEvent;
use crate::domain::user::{User, UserRole};
use crate::domain::DomainResult;

/// One-way password hashing.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw_password: &str) -> DomainResult<String>;

    /// A malformed stored hash counts as a mismatch.
    fn matches(&self, raw_password: &str, password_hash: &str) -> bool;
}

/// Snapshot of the authenticated user that tokens are issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtUserIdentity {
    pub id: i32,
    pub username: String,
    /// Stored password hash; refresh tokens are bound to it.
    #[serde(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl JwtUserIdentity {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            is_active: user.is_active,
            email: user.email.clone(),
            first_name: user.profile.as_ref().map(|p| p.first_name.clone()),
            last_name: user.profile.as_ref().map(|p| p.last_name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues access/refresh token pairs.
pub trait TokenIssuer: Send + Sync {
    fn generate_tokens(&self, identity: &JwtUserIdentity) -> DomainResult<Tokens>;
}

/// Fire-and-forget notification of user changes.
pub trait UserEventPublisher: Send + Sync {
    fn publish(&self, event: UserUpdatedEvent);
}
