#[derive(Debug, Clone)]
pub struct LoginUserInput {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ForgotPasswordInput {
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}
