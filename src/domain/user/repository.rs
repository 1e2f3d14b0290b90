use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

/// Change applied to a stored user inside [`UserRepositoryInterface::update_user`].
pub type UserUpdate = Box<dyn FnOnce(&mut User) + Send>;

/// Persistence port for the user aggregate.
///
/// Writes cover the user row together with its profile and federated
/// identities; implementations must apply each one atomically.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn find_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_username_or_email(&self, username_or_email: &str)
        -> DomainResult<Option<User>>;

    /// Insert when `user.id` is `None`, update otherwise. Returns the stored state.
    async fn save(&self, user: User) -> DomainResult<User>;

    /// Load, modify and store user `id` as one unit of work. Concurrent
    /// updates of the same user are serialized, so none of them is lost.
    async fn update_user(&self, id: i32, apply: UserUpdate) -> DomainResult<User>;

    /// Remove user `id` and return the removed state.
    async fn delete(&self, id: i32) -> DomainResult<User>;
}
