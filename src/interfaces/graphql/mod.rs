//! GraphQL schema: account mutations, the `user` query and the
//! `usersUpdated` subscription.
//!
//! Transport is left to the embedding server; the schema is executed with
//! `AppSchema::execute` / `execute_stream`.

mod errors;
pub mod inputs;
pub mod mutations;
pub mod query;
pub mod subscription;
pub mod types;

use async_graphql::Schema;

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use query::QueryRoot;
pub use subscription::SubscriptionRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with the services of `state` attached as context data.
pub fn build_schema(state: &AppState) -> AppSchema {
    Schema::build(
        QueryRoot,
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(state.users.clone())
    .data(state.credentials.clone())
    .data(state.event_bus.clone())
    .finish()
}
