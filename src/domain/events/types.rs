//! User change events
//!
//! Defines the events broadcast to subscribers after a user mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Kind of mutation that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserMutation {
    AddUser,
    EditUser,
    DeleteUser,
}

impl UserMutation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserMutation::AddUser => "ADD_USER",
            UserMutation::EditUser => "EDIT_USER",
            UserMutation::DeleteUser => "DELETE_USER",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdatedEvent {
    pub mutation: UserMutation,
    pub user: User,
}

impl UserUpdatedEvent {
    pub fn new(mutation: UserMutation, user: User) -> Self {
        Self { mutation, user }
    }

    pub fn event_type(&self) -> &'static str {
        self.mutation.as_str()
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user.id
    }
}

/// Event envelope delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: UserUpdatedEvent,
}

impl EventMessage {
    pub fn new(event: UserUpdatedEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
