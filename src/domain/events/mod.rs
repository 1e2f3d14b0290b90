//! Domain events
//!
//! Event types that represent facts about what happened to users.
//! The EventBus implementation lives in `application::events`.

pub mod types;

pub use types::{EventMessage, UserMutation, UserUpdatedEvent};
