//! # User accounts
//!
//! User-account mutations (add, edit, delete, login) behind a GraphQL schema.
//!
//! ## Architecture
//!
//! - **domain**: the user aggregate, input DTOs, events and port traits
//! - **application**: `UserService`, `CredentialService` and the event bus
//! - **infrastructure**: SeaORM persistence, in-memory storage, bcrypt and JWT
//! - **interfaces**: the async-graphql schema

pub mod app_state;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use app_state::AppState;
pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{ensure_schema, init_database, DatabaseConfig};

// Re-export the GraphQL schema
pub use interfaces::{build_schema, AppSchema};

// Re-export events
pub use application::{create_event_bus, EventBus, SharedEventBus};
