pub mod events;
pub mod identity;

pub use events::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use identity::{AuthResult, CredentialService, UserPayload, UserService};
