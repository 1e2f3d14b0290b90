//! Mapping of domain errors onto GraphQL errors

use async_graphql::{Error, ErrorExtensions};
use tracing::error;

use crate::domain::DomainError;

impl ErrorExtensions for DomainError {
    fn extend(&self) -> Error {
        if self.code() == "INTERNAL_ERROR" {
            error!(error = %self, "Mutation failed");
        }
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Shorthand for `map_err(|e| e.extend())` in resolvers.
pub(crate) fn gql_err(err: DomainError) -> Error {
    err.extend()
}
