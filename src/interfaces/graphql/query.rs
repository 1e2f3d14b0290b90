use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::application::{UserPayload as ServicePayload, UserService};

use super::errors::gql_err;
use super::types::UserPayload;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Look up a user by ID
    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<UserPayload>> {
        let service = ctx.data::<Arc<UserService>>()?;
        let user = service.find_user(id).await.map_err(gql_err)?;
        Ok(user.map(|u| ServicePayload::new(u).into()))
    }
}
