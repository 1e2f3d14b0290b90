pub mod events;
pub mod ports;
pub mod user;

// Re-export commonly used types
pub use events::{EventMessage, UserMutation, UserUpdatedEvent};
pub use ports::{JwtUserIdentity, PasswordEncoder, TokenIssuer, Tokens, UserEventPublisher};
pub use user::{
    AddUserInput, AuthInput, EditUserInput, LoginUserInput, ProfileInput, User, UserAuth,
    UserProfile, UserRepositoryInterface, UserRole, UserUpdate,
};

// Re-export DomainError from support for convenience
pub use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
