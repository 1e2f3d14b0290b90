use validator::Validate;

use super::{AuthInput, ProfileInput, UserRole};

#[derive(Debug, Clone, Validate)]
pub struct AddUserInput {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 72, message = "must be 8-72 characters"))]
    pub password: String,
    pub role: UserRole,
    /// Defaults to `false` when omitted.
    pub is_active: Option<bool>,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(nested)]
    pub profile: Option<ProfileInput>,
    pub auth: Option<AuthInput>,
}
