//! Identity module: user management & authentication
//!
//! `UserService` covers the account lifecycle (add, edit, delete);
//! `CredentialService` covers login and the password flows.

pub mod credentials;
pub mod service;

pub use credentials::{AuthResult, CredentialService};
pub use service::{UserPayload, UserService};
