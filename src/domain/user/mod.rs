//! User aggregate
//!
//! Contains the User entity, input DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_add;
mod dto_credentials;
mod dto_edit;
mod dto_profile;

// Re-export model types
pub use model::{
    CertificateAuth, FacebookAuth, GithubAuth, GoogleAuth, LinkedInAuth, User, UserAuth,
    UserProfile, UserRole,
};

// Re-export DTOs
pub use dto_add::AddUserInput;
pub use dto_credentials::{
    ForgotPasswordInput, LoginUserInput, RegisterUserInput, ResetPasswordInput,
};
pub use dto_edit::EditUserInput;
pub use dto_profile::{
    AuthInput, CertificateInput, FacebookInput, GithubInput, GoogleInput, LinkedInInput,
    ProfileInput,
};

// Re-export repository trait
pub use repository::{UserRepositoryInterface, UserUpdate};
