//! Database entities module

pub mod user;
pub mod user_auth;
pub mod user_profile;

pub use user::Entity as User;
pub use user_auth::Entity as UserAuth;
pub use user_profile::Entity as UserProfile;
