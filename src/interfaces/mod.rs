//! Interface adapters

pub mod graphql;

pub use graphql::{build_schema, AppSchema};
