use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::application::CredentialService;
use crate::interfaces::graphql::errors::gql_err;
use crate::interfaces::graphql::inputs::{
    ForgotPasswordInput, LoginUserInput, RegisterUserInput, ResetPasswordInput,
};
use crate::interfaces::graphql::types::{AuthPayload, UserPayload};

/// Credential flows
#[derive(Default)]
pub struct CredentialMutation;

#[Object]
impl CredentialMutation {
    /// Log in with username or email and receive an access/refresh token pair
    async fn login(&self, ctx: &Context<'_>, input: LoginUserInput) -> Result<AuthPayload> {
        let service = ctx.data::<Arc<CredentialService>>()?;
        let result = service.login(input.into()).await.map_err(gql_err)?;
        Ok(result.into())
    }

    async fn forgot_password(
        &self,
        ctx: &Context<'_>,
        input: ForgotPasswordInput,
    ) -> Result<Option<String>> {
        let service = ctx.data::<Arc<CredentialService>>()?;
        Ok(service
            .forgot_password(input.into())
            .await
            .map_err(gql_err)?)
    }

    async fn reset_password(
        &self,
        ctx: &Context<'_>,
        input: ResetPasswordInput,
    ) -> Result<Option<String>> {
        let service = ctx.data::<Arc<CredentialService>>()?;
        Ok(service
            .reset_password(input.into())
            .await
            .map_err(gql_err)?)
    }

    async fn register(
        &self,
        ctx: &Context<'_>,
        input: RegisterUserInput,
    ) -> Result<Option<UserPayload>> {
        let service = ctx.data::<Arc<CredentialService>>()?;
        let payload = service.register(input.into()).await.map_err(gql_err)?;
        Ok(payload.map(Into::into))
    }
}
