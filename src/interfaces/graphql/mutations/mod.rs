//! GraphQL mutations, organized by use-case

mod account;
mod credentials;

pub use account::AccountMutation;
pub use credentials::CredentialMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation groups
#[derive(MergedObject, Default)]
pub struct MutationRoot(AccountMutation, CredentialMutation);
