//! Service wiring shared by the binary and the tests

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{create_event_bus, CredentialService, SharedEventBus, UserService};
use crate::config::{AdminSection, AppConfig};
use crate::domain::{
    AddUserInput, DomainResult, PasswordEncoder, TokenIssuer, User, UserRepositoryInterface,
    UserRole,
};
use crate::infrastructure::{
    ensure_schema, init_database, BcryptPasswordEncoder, JwtGenerator, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub credentials: Arc<CredentialService>,
    pub event_bus: SharedEventBus,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        password_encoder: Arc<dyn PasswordEncoder>,
        token_issuer: Arc<dyn TokenIssuer>,
        event_bus: SharedEventBus,
    ) -> Self {
        let users = Arc::new(UserService::new(
            repo.clone(),
            event_bus.clone(),
            password_encoder.clone(),
        ));
        let credentials = Arc::new(CredentialService::new(repo, password_encoder, token_issuer));

        Self {
            users,
            credentials,
            event_bus,
        }
    }

    /// Connect to the configured database, create missing tables and wire
    /// the bcrypt / JWT adapters.
    pub async fn from_config(config: &AppConfig) -> DomainResult<Self> {
        let db = init_database(&config.database_config()).await?;
        ensure_schema(&db).await?;

        Ok(Self::new(
            Arc::new(UserRepository::new(db)),
            Arc::new(BcryptPasswordEncoder::with_cost(config.security.bcrypt_cost)),
            Arc::new(JwtGenerator::new(config.jwt_config())),
            create_event_bus(),
        ))
    }

    /// Create the configured administrator unless a user with that username
    /// already exists. Returns the created user.
    pub async fn ensure_default_admin(&self, admin: &AdminSection) -> DomainResult<Option<User>> {
        if !admin.enabled {
            return Ok(None);
        }
        if self
            .users
            .find_by_username_or_email(&admin.username)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        info!(username = %admin.username, "Creating default admin user...");
        let payload = self
            .users
            .add_user(AddUserInput {
                username: admin.username.clone(),
                password: admin.password.clone(),
                role: UserRole::Admin,
                is_active: Some(true),
                email: admin.email.clone(),
                profile: None,
                auth: None,
            })
            .await?;

        warn!("Default admin created; change its password immediately");
        Ok(Some(payload.user))
    }
}
