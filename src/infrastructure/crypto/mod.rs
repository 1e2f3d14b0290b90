//! Cryptographic adapters: password hashing and token issuance

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, JwtGenerator};
pub use password::BcryptPasswordEncoder;
