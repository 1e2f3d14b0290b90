//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::{BcryptPasswordEncoder, JwtConfig, JwtGenerator};
pub use database::{ensure_schema, init_database, DatabaseConfig, UserRepository};
pub use storage::InMemoryUserRepository;
