//! In-memory user repository

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, User, UserRepositoryInterface, UserUpdate};

/// In-memory storage for development and testing
pub struct InMemoryUserRepository {
    users: DashMap<i32, User>,
    id_counter: AtomicI32,
    /// Held by every write so read-modify-write sequences do not interleave.
    write_lock: Mutex<()>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            id_counter: AtomicI32::new(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn check_unique(&self, user: &User) -> DomainResult<()> {
        let taken = self.users.iter().any(|entry| {
            entry.id != user.id
                && (entry.username == user.username || entry.email == user.email)
        });
        if taken {
            return Err(DomainError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        Ok(())
    }

    fn store(&self, mut user: User) -> DomainResult<User> {
        self.check_unique(&user)?;

        let id = match user.id {
            Some(id) if self.users.contains_key(&id) => id,
            Some(id) => {
                return Err(DomainError::user_not_found_by_id(id));
            }
            None => self.id_counter.fetch_add(1, Ordering::SeqCst),
        };

        user.id = Some(id);
        user.updated_at = Utc::now();
        self.users.insert(id, user.clone());
        Ok(user)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn find_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username_or_email || u.email == username_or_email)
            .map(|u| u.clone()))
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        let _guard = self.write_lock.lock().await;
        self.store(user)
    }

    async fn update_user(&self, id: i32, apply: UserUpdate) -> DomainResult<User> {
        let _guard = self.write_lock.lock().await;

        let mut user = self
            .users
            .get(&id)
            .map(|u| u.clone())
            .ok_or_else(|| DomainError::user_not_found_by_id(id))?;
        apply(&mut user);
        user.id = Some(id);

        self.store(user)
    }

    async fn delete(&self, id: i32) -> DomainResult<User> {
        let _guard = self.write_lock.lock().await;

        self.users
            .remove(&id)
            .map(|(_, user)| user)
            .ok_or_else(|| DomainError::user_not_found_by_id(id))
    }
}
