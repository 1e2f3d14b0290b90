//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::{DomainError, DomainResult, PasswordEncoder};
use crate::support::InfraError;

/// bcrypt ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// bcrypt-backed [`PasswordEncoder`]
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    /// bcrypt accepts costs from 4 to 31.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> DomainResult<String> {
        if raw_password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation(format!(
                "password: must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        hash_password(raw_password, self.cost).map_err(|e| InfraError::from(e).into())
    }

    fn matches(&self, raw_password: &str, password_hash: &str) -> bool {
        verify_password(raw_password, password_hash).unwrap_or(false)
    }
}
