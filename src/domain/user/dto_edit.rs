use validator::Validate;

use super::{AuthInput, ProfileInput, UserRole};

#[derive(Debug, Clone, Validate)]
pub struct EditUserInput {
    pub id: i32,
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    pub role: UserRole,
    pub is_active: Option<bool>,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "must be 8-72 characters"))]
    pub password: Option<String>,
    #[validate(nested)]
    pub profile: Option<ProfileInput>,
    pub auth: Option<AuthInput>,
}
