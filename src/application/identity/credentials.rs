//! Credential flows: login and the not-yet-supported password flows

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{ForgotPasswordInput, RegisterUserInput, ResetPasswordInput};
use crate::domain::{
    DomainError, DomainResult, JwtUserIdentity, LoginUserInput, PasswordEncoder, TokenIssuer,
    Tokens, User, UserRepositoryInterface,
};

use super::UserPayload;

/// Authentication result returned after a successful login.
///
/// `identity` is the authenticated principal; callers install it in their own
/// request context instead of relying on ambient state.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub tokens: Tokens,
    pub identity: JwtUserIdentity,
}

pub struct CredentialService {
    repo: Arc<dyn UserRepositoryInterface>,
    password_encoder: Arc<dyn PasswordEncoder>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl CredentialService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        password_encoder: Arc<dyn PasswordEncoder>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            password_encoder,
            token_issuer,
        }
    }

    /// Authenticate by username or email + password and issue a token pair.
    pub async fn login(&self, input: LoginUserInput) -> DomainResult<AuthResult> {
        let user = self
            .repo
            .find_by_username_or_email(&input.username_or_email)
            .await?
            .ok_or_else(|| DomainError::user_not_found_by_login(&input.username_or_email))?;

        if !self
            .password_encoder
            .matches(&input.password, &user.password_hash)
        {
            debug!(username = %user.username, "Password is invalid");
            return Err(DomainError::InvalidPassword);
        }

        let identity = JwtUserIdentity::from_user(&user);
        let tokens = self.token_issuer.generate_tokens(&identity)?;

        info!(user_id = identity.id, username = %identity.username, "User logged in");

        Ok(AuthResult {
            user,
            tokens,
            identity,
        })
    }

    // TODO: send a reset link once a mail transport exists.
    pub async fn forgot_password(&self, _input: ForgotPasswordInput) -> DomainResult<Option<String>> {
        Ok(None)
    }

    pub async fn reset_password(&self, _input: ResetPasswordInput) -> DomainResult<Option<String>> {
        Ok(None)
    }

    pub async fn register(&self, _input: RegisterUserInput) -> DomainResult<Option<UserPayload>> {
        Ok(None)
    }
}
