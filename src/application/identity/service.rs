//! User management service: account lifecycle use-cases
//!
//! Add, edit and delete orchestrate validation, password hashing, the
//! aggregate merge rules, persistence and event publication. GraphQL
//! resolvers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::{
    AddUserInput, DomainResult, EditUserInput, PasswordEncoder, User, UserAuth,
    UserEventPublisher, UserMutation, UserProfile, UserRepositoryInterface, UserUpdatedEvent,
};

/// Result of a user mutation: the affected user.
#[derive(Debug, Clone)]
pub struct UserPayload {
    pub user: User,
}

impl UserPayload {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

/// User service orchestrates the add / edit / delete use-cases.
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    publisher: Arc<dyn UserEventPublisher>,
    password_encoder: Arc<dyn PasswordEncoder>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        publisher: Arc<dyn UserEventPublisher>,
        password_encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        Self {
            repo,
            publisher,
            password_encoder,
        }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user with an optional profile and federated identities.
    pub async fn add_user(&self, input: AddUserInput) -> DomainResult<UserPayload> {
        input.validate()?;

        let password_hash = self.password_encoder.encode(&input.password)?;
        let mut user = User::new(
            input.username,
            password_hash,
            input.role,
            input.is_active.unwrap_or(false),
            input.email,
        );
        user.profile = input.profile.map(UserProfile::from);
        user.auth = input.auth.map(UserAuth::from);

        let user = self.repo.save(user).await?;
        info!(user_id = ?user.id, username = %user.username, "User added");

        self.publisher
            .publish(UserUpdatedEvent::new(UserMutation::AddUser, user.clone()));

        Ok(UserPayload::new(user))
    }

    /// Edit an existing user.
    ///
    /// Username, role and email are always overwritten; the active flag and
    /// password only when supplied. Profile and auth are merged field by field
    /// against the stored state, inside the repository's unit of work.
    pub async fn edit_user(&self, input: EditUserInput) -> DomainResult<UserPayload> {
        input.validate()?;

        let password_hash = input
            .password
            .as_deref()
            .map(|password| self.password_encoder.encode(password))
            .transpose()?;

        let id = input.id;
        let user = self
            .repo
            .update_user(
                id,
                Box::new(move |user: &mut User| apply_edit(user, input, password_hash)),
            )
            .await?;
        info!(user_id = id, "User edited");

        self.publisher
            .publish(UserUpdatedEvent::new(UserMutation::EditUser, user.clone()));

        Ok(UserPayload::new(user))
    }

    /// Delete a user by ID. The payload carries the removed user.
    pub async fn delete_user(&self, id: i32) -> DomainResult<UserPayload> {
        let user = self.repo.delete(id).await?;
        info!(user_id = id, "User deleted");

        self.publisher
            .publish(UserUpdatedEvent::new(UserMutation::DeleteUser, user.clone()));

        Ok(UserPayload::new(user))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn find_user(&self, id: i32) -> DomainResult<Option<User>> {
        self.repo.find_user_by_id(id).await
    }

    pub async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> DomainResult<Option<User>> {
        self.repo.find_by_username_or_email(username_or_email).await
    }
}

fn apply_edit(user: &mut User, input: EditUserInput, password_hash: Option<String>) {
    user.username = input.username;
    user.role = input.role;
    user.email = input.email;

    if let Some(is_active) = input.is_active {
        user.is_active = is_active;
    }
    if let Some(password_hash) = password_hash {
        user.password_hash = password_hash;
    }
    if let Some(profile) = input.profile {
        user.merge_profile(profile);
    }
    if let Some(auth) = input.auth {
        user.merge_auth(auth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::events::{EventBus, EventSubscriber};
    use crate::domain::user::{
        CertificateInput, FacebookInput, GithubInput, GoogleInput, LinkedInInput,
    };
    use crate::domain::{AuthInput, DomainError, ProfileInput, UserRole};
    use crate::infrastructure::crypto::password::BcryptPasswordEncoder;
    use crate::infrastructure::storage::InMemoryUserRepository;

    struct Fixture {
        service: UserService,
        repo: Arc<InMemoryUserRepository>,
        bus: Arc<EventBus>,
        encoder: Arc<BcryptPasswordEncoder>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryUserRepository::new());
        let bus = Arc::new(EventBus::new());
        let encoder = Arc::new(BcryptPasswordEncoder::with_cost(4));
        let service = UserService::new(repo.clone(), bus.clone(), encoder.clone());
        Fixture {
            service,
            repo,
            bus,
            encoder,
        }
    }

    async fn assert_no_more_events(events: &mut EventSubscriber) {
        let next = tokio::time::timeout(Duration::from_millis(50), events.recv()).await;
        assert!(next.is_err(), "unexpected extra event: {next:?}");
    }

    fn add_input() -> AddUserInput {
        AddUserInput {
            username: "user".into(),
            password: "supersecret".into(),
            role: UserRole::User,
            is_active: Some(true),
            email: "user@example.com".into(),
            profile: Some(ProfileInput {
                first_name: Some("Edward".into()),
                last_name: Some("Fillmore".into()),
            }),
            auth: None,
        }
    }

    fn edit_input(id: i32) -> EditUserInput {
        EditUserInput {
            id,
            username: "renamed".into(),
            role: UserRole::Admin,
            is_active: None,
            email: "renamed@example.com".into(),
            password: None,
            profile: None,
            auth: None,
        }
    }

    #[tokio::test]
    async fn test_add_user() {
        let f = fixture();
        let mut events = f.bus.subscribe();

        let payload = f.service.add_user(add_input()).await.unwrap();
        let user = payload.user;

        assert!(user.id.is_some());
        assert_eq!(user.username, "user");
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.profile.as_ref().unwrap().full_name, "Edward Fillmore");
        assert!(user.auth.is_none());
        assert!(f.encoder.matches("supersecret", &user.password_hash));

        let msg = events.recv().await.unwrap();
        assert_eq!(msg.event.mutation, UserMutation::AddUser);
        assert_eq!(msg.event.user.id, user.id);
        assert_no_more_events(&mut events).await;
    }

    #[tokio::test]
    async fn test_add_user_defaults_inactive() {
        let f = fixture();
        let mut input = add_input();
        input.is_active = None;

        let user = f.service.add_user(input).await.unwrap().user;
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_add_user_rejects_invalid_input() {
        let f = fixture();
        let mut input = add_input();
        input.email = "not-an-email".into();
        input.password = "short".into();

        let err = f.service.add_user(input).await.unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_password_longer_than_bcrypt_input_is_rejected() {
        let f = fixture();
        let prefix = "p".repeat(72);

        let mut input = add_input();
        input.password = format!("{prefix}-one");
        let err = f.service.add_user(input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("password")));

        let mut input = add_input();
        input.password = prefix.clone();
        let id = f.service.add_user(input).await.unwrap().user.id.unwrap();

        let mut edit = edit_input(id);
        edit.password = Some(format!("{prefix}-two"));
        let err = f.service.edit_user(edit).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("password")));
    }

    #[tokio::test]
    async fn test_edit_user_keeps_omitted_fields() {
        let f = fixture();
        let original = f.service.add_user(add_input()).await.unwrap().user;
        let id = original.id.unwrap();

        let edited = f.service.edit_user(edit_input(id)).await.unwrap().user;

        assert_eq!(edited.id, Some(id));
        assert_eq!(edited.username, "renamed");
        assert_eq!(edited.role, UserRole::Admin);
        assert_eq!(edited.email, "renamed@example.com");
        assert!(edited.is_active);
        assert_eq!(edited.password_hash, original.password_hash);
        assert_eq!(edited.profile, original.profile);
    }

    #[tokio::test]
    async fn test_edit_user_overwrites_supplied_fields() {
        let f = fixture();
        let id = f.service.add_user(add_input()).await.unwrap().user.id.unwrap();

        let mut input = edit_input(id);
        input.is_active = Some(false);
        input.password = Some("another-secret".into());
        input.profile = Some(ProfileInput {
            first_name: Some("John".into()),
            last_name: None,
        });

        let edited = f.service.edit_user(input).await.unwrap().user;

        assert!(!edited.is_active);
        assert!(f.encoder.matches("another-secret", &edited.password_hash));
        let profile = edited.profile.unwrap();
        assert_eq!(profile.last_name, "Fillmore");
        assert_eq!(profile.full_name, "John Fillmore");
    }

    #[tokio::test]
    async fn test_edit_user_sets_all_federated_identities() {
        let f = fixture();
        let id = f.service.add_user(add_input()).await.unwrap().user.id.unwrap();

        let mut input = edit_input(id);
        input.auth = Some(AuthInput {
            certificate: Some(CertificateInput {
                serial: "some_unique_id".into(),
            }),
            facebook: Some(FacebookInput {
                fb_id: "fb_id".into(),
                display_name: "some".into(),
            }),
            linkedin: Some(LinkedInInput {
                ln_id: "ln_id".into(),
                display_name: "LinkedIn".into(),
            }),
            google: Some(GoogleInput {
                google_id: "g_id".into(),
                display_name: "google".into(),
            }),
            github: Some(GithubInput {
                gh_id: "gh_id".into(),
                display_name: "github".into(),
            }),
        });

        f.service.edit_user(input).await.unwrap();

        let stored = f.repo.find_user_by_id(id).await.unwrap().unwrap();
        let auth = stored.auth.unwrap();
        assert_eq!(auth.certificate.unwrap().serial, "some_unique_id");
        assert_eq!(auth.facebook.unwrap().display_name, "some");
        assert_eq!(auth.linkedin.unwrap().ln_id, "ln_id");
        assert_eq!(auth.google.unwrap().google_id, "g_id");
        assert_eq!(auth.github.unwrap().gh_id, "gh_id");
    }

    #[tokio::test]
    async fn test_edit_missing_user() {
        let f = fixture();
        let mut events = f.bus.subscribe();

        let err = f.service.edit_user(edit_input(999)).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { field: "id", .. }));

        assert_no_more_events(&mut events).await;
    }

    #[tokio::test]
    async fn test_edit_user_publishes_one_event() {
        let f = fixture();
        let id = f.service.add_user(add_input()).await.unwrap().user.id.unwrap();
        let mut events = f.bus.subscribe();

        f.service.edit_user(edit_input(id)).await.unwrap();

        let msg = events.recv().await.unwrap();
        assert_eq!(msg.event.mutation, UserMutation::EditUser);
        assert_eq!(msg.event.user.id, Some(id));
        assert_eq!(msg.event.user.username, "renamed");
        assert_no_more_events(&mut events).await;
    }

    #[tokio::test]
    async fn test_concurrent_edits_merge_identities() {
        let f = fixture();
        let id = f.service.add_user(add_input()).await.unwrap().user.id.unwrap();

        let mut with_github = edit_input(id);
        with_github.auth = Some(AuthInput {
            github: Some(GithubInput {
                gh_id: "gh".into(),
                display_name: "github".into(),
            }),
            ..Default::default()
        });
        let mut with_google = edit_input(id);
        with_google.auth = Some(AuthInput {
            google: Some(GoogleInput {
                google_id: "g".into(),
                display_name: "google".into(),
            }),
            ..Default::default()
        });

        let (a, b) = tokio::join!(
            f.service.edit_user(with_github),
            f.service.edit_user(with_google)
        );
        a.unwrap();
        b.unwrap();

        let auth = f.repo.find_user_by_id(id).await.unwrap().unwrap().auth.unwrap();
        assert_eq!(auth.github.unwrap().gh_id, "gh");
        assert_eq!(auth.google.unwrap().google_id, "g");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let f = fixture();
        let id = f.service.add_user(add_input()).await.unwrap().user.id.unwrap();
        let mut events = f.bus.subscribe();

        let deleted = f.service.delete_user(id).await.unwrap().user;
        assert_eq!(deleted.id, Some(id));
        assert!(f.service.find_user(id).await.unwrap().is_none());

        let msg = events.recv().await.unwrap();
        assert_eq!(msg.event.mutation, UserMutation::DeleteUser);
        assert_eq!(msg.event.user.id, Some(id));
        assert_no_more_events(&mut events).await;

        let err = f.service.delete_user(id).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { .. }));
    }
}
