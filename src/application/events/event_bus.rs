//! Broadcast of user change events
//!
//! Every successful add, edit or delete publishes one [`UserUpdatedEvent`].
//! Subscribers (the `usersUpdated` GraphQL subscription, the event log in
//! `main`) each get their own copy, in publication order.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::{EventMessage, UserEventPublisher, UserUpdatedEvent};

const DEFAULT_CAPACITY: usize = 1024;

pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` bounds how far a slow subscriber may fall behind before it
    /// starts skipping events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: UserUpdatedEvent) {
        let mutation = event.event_type();
        let user_id = event.user_id();

        // Err only means nobody is listening.
        let delivered = self.sender.send(EventMessage::new(event)).unwrap_or(0);
        debug!(mutation, ?user_id, subscribers = delivered, "User event published");
    }

    pub fn subscribe(&self) -> EventSubscriber {
        debug!(
            subscribers = self.sender.receiver_count() + 1,
            "User event subscriber attached"
        );
        EventSubscriber {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl UserEventPublisher for EventBus {
    fn publish(&self, event: UserUpdatedEvent) {
        EventBus::publish(self, event);
    }
}

/// Receiving end handed to each subscriber
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
}

impl EventSubscriber {
    /// Next event, or `None` once the bus is gone. Events dropped because
    /// this subscriber lagged are skipped with a warning.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "User event subscriber lagged, skipping events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{User, UserMutation, UserRole};

    fn event(mutation: UserMutation, id: i32) -> UserUpdatedEvent {
        let mut user = User::new(
            "admin".into(),
            "hash".into(),
            UserRole::Admin,
            true,
            "admin@example.com".into(),
        );
        user.id = Some(id);
        UserUpdatedEvent::new(mutation, user)
    }

    #[tokio::test]
    async fn test_every_subscriber_gets_each_event() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(event(UserMutation::EditUser, 1));

        for subscriber in [&mut first, &mut second] {
            let received = tokio::time::timeout(Duration::from_millis(100), subscriber.recv())
                .await
                .expect("Timeout")
                .expect("No message");
            assert_eq!(received.event.event_type(), "EDIT_USER");
            assert_eq!(received.event.user_id(), Some(1));
        }
    }

    #[tokio::test]
    async fn test_publish_through_port_keeps_order() {
        let bus = create_event_bus();
        let mut subscriber = bus.subscribe();
        let publisher: Arc<dyn UserEventPublisher> = bus.clone();

        publisher.publish(event(UserMutation::AddUser, 2));
        publisher.publish(event(UserMutation::DeleteUser, 2));

        let first = subscriber.recv().await.expect("No message");
        let second = subscriber.recv().await.expect("No message");
        assert_eq!(first.event.mutation, UserMutation::AddUser);
        assert_eq!(second.event.mutation, UserMutation::DeleteUser);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(event(UserMutation::AddUser, 1));
    }

    #[tokio::test]
    async fn test_lagged_subscriber_skips_to_newest() {
        let bus = EventBus::with_capacity(2);
        let mut subscriber = bus.subscribe();

        for id in 1..=4 {
            bus.publish(event(UserMutation::EditUser, id));
        }

        let next = subscriber.recv().await.expect("No message");
        assert_eq!(next.event.user_id(), Some(3));
    }

    #[tokio::test]
    async fn test_recv_ends_when_bus_dropped() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();
        drop(bus);

        assert!(subscriber.recv().await.is_none());
    }
}
