use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::application::UserService;
use crate::interfaces::graphql::errors::gql_err;
use crate::interfaces::graphql::inputs::{AddUserInput, EditUserInput};
use crate::interfaces::graphql::types::UserPayload;

/// Account lifecycle mutations
#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    /// Create a new user
    async fn add_user(&self, ctx: &Context<'_>, input: AddUserInput) -> Result<UserPayload> {
        let service = ctx.data::<Arc<UserService>>()?;
        let payload = service.add_user(input.into()).await.map_err(gql_err)?;
        Ok(payload.into())
    }

    /// Edit an existing user
    async fn edit_user(&self, ctx: &Context<'_>, input: EditUserInput) -> Result<UserPayload> {
        let service = ctx.data::<Arc<UserService>>()?;
        let payload = service.edit_user(input.into()).await.map_err(gql_err)?;
        Ok(payload.into())
    }

    /// Delete a user, returning it as it was before deletion
    async fn delete_user(&self, ctx: &Context<'_>, id: i32) -> Result<UserPayload> {
        let service = ctx.data::<Arc<UserService>>()?;
        let payload = service.delete_user(id).await.map_err(gql_err)?;
        Ok(payload.into())
    }
}
