use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ActiveValue::{NotSet, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};

use crate::domain::{
    DomainError, DomainResult, User, UserAuth, UserProfile, UserRepositoryInterface, UserRole,
    UserUpdate,
};
use crate::domain::user::{CertificateAuth, FacebookAuth, GithubAuth, GoogleAuth, LinkedInAuth};
use crate::infrastructure::database::entities::{user, user_auth, user_profile};

/// SeaORM-backed user repository. Every write runs in its own transaction.
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn pair<T>(
    id: Option<String>,
    display_name: Option<String>,
    build: impl FnOnce(String, String) -> T,
) -> Option<T> {
    id.map(|id| build(id, display_name.unwrap_or_default()))
}

fn auth_model_to_domain(model: user_auth::Model) -> UserAuth {
    UserAuth {
        certificate: model
            .certificate_serial
            .map(|serial| CertificateAuth { serial }),
        facebook: pair(model.facebook_id, model.facebook_display_name, |fb_id, display_name| {
            FacebookAuth {
                fb_id,
                display_name,
            }
        }),
        linkedin: pair(model.linkedin_id, model.linkedin_display_name, |ln_id, display_name| {
            LinkedInAuth {
                ln_id,
                display_name,
            }
        }),
        google: pair(model.google_id, model.google_display_name, |google_id, display_name| {
            GoogleAuth {
                google_id,
                display_name,
            }
        }),
        github: pair(model.github_id, model.github_display_name, |gh_id, display_name| {
            GithubAuth {
                gh_id,
                display_name,
            }
        }),
    }
}

fn auth_to_active_model(user_id: i32, auth: &UserAuth) -> user_auth::ActiveModel {
    user_auth::ActiveModel {
        user_id: Set(user_id),
        certificate_serial: Set(auth.certificate.as_ref().map(|c| c.serial.clone())),
        facebook_id: Set(auth.facebook.as_ref().map(|f| f.fb_id.clone())),
        facebook_display_name: Set(auth.facebook.as_ref().map(|f| f.display_name.clone())),
        linkedin_id: Set(auth.linkedin.as_ref().map(|l| l.ln_id.clone())),
        linkedin_display_name: Set(auth.linkedin.as_ref().map(|l| l.display_name.clone())),
        google_id: Set(auth.google.as_ref().map(|g| g.google_id.clone())),
        google_display_name: Set(auth.google.as_ref().map(|g| g.display_name.clone())),
        github_id: Set(auth.github.as_ref().map(|g| g.gh_id.clone())),
        github_display_name: Set(auth.github.as_ref().map(|g| g.display_name.clone())),
    }
}

fn profile_model_to_domain(model: user_profile::Model) -> UserProfile {
    UserProfile {
        first_name: model.first_name,
        last_name: model.last_name,
        full_name: model.full_name,
    }
}

fn user_model_to_domain(
    model: user::Model,
    profile: Option<user_profile::Model>,
    auth: Option<user_auth::Model>,
) -> User {
    User {
        id: Some(model.id),
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        profile: profile.map(profile_model_to_domain),
        auth: auth.map(auth_model_to_domain),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

async fn load_aggregate<C: ConnectionTrait>(db: &C, model: user::Model) -> Result<User, DbErr> {
    let profile = user_profile::Entity::find_by_id(model.id).one(db).await?;
    let auth = user_auth::Entity::find_by_id(model.id).one(db).await?;
    Ok(user_model_to_domain(model, profile, auth))
}

/// Upsert the user row and replace its profile and auth rows.
async fn write_aggregate<C: ConnectionTrait>(db: &C, user: User) -> Result<User, DbErr> {
    let active = user::ActiveModel {
        id: user.id.map_or(NotSet, Unchanged),
        username: Set(user.username),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(domain_role_to_entity(user.role)),
        is_active: Set(user.is_active),
        created_at: Set(user.created_at),
        updated_at: Set(Utc::now()),
    };
    let model = if user.id.is_some() {
        active.update(db).await?
    } else {
        active.insert(db).await?
    };

    // Nested rows are replaced wholesale; the aggregate already holds the merged state.
    user_profile::Entity::delete_by_id(model.id).exec(db).await?;
    let profile = match user.profile {
        Some(profile) => Some(
            user_profile::ActiveModel {
                user_id: Set(model.id),
                first_name: Set(profile.first_name),
                last_name: Set(profile.last_name),
                full_name: Set(profile.full_name),
            }
            .insert(db)
            .await?,
        ),
        None => None,
    };

    user_auth::Entity::delete_by_id(model.id).exec(db).await?;
    let auth = match user.auth {
        Some(ref auth) => Some(auth_to_active_model(model.id, auth).insert(db).await?),
        None => None,
    };

    Ok(user_model_to_domain(model, profile, auth))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn find_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;

        match model {
            Some(model) => Ok(Some(load_aggregate(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username_or_email))
                    .add(user::Column::Email.eq(username_or_email)),
            )
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(load_aggregate(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        let txn = self.db.begin().await?;
        let stored = write_aggregate(&txn, user).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn update_user(&self, id: i32, apply: UserUpdate) -> DomainResult<User> {
        let txn = self.db.begin().await?;

        // Take the write lock before reading; concurrent updates of this user wait here.
        let claimed = user::Entity::update_many()
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::user_not_found_by_id(id));
        }

        let Some(model) = user::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DomainError::user_not_found_by_id(id));
        };
        let mut current = load_aggregate(&txn, model).await?;
        apply(&mut current);
        current.id = Some(id);

        let stored = write_aggregate(&txn, current).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> DomainResult<User> {
        let txn = self.db.begin().await?;

        let Some(model) = user::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DomainError::user_not_found_by_id(id));
        };
        let removed = load_aggregate(&txn, model).await?;

        user_profile::Entity::delete_by_id(id).exec(&txn).await?;
        user_auth::Entity::delete_by_id(id).exec(&txn).await?;
        let result = user::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::user_not_found_by_id(id));
        }

        txn.commit().await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{ensure_schema, init_database, DatabaseConfig};

    async fn repo() -> UserRepository {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        UserRepository::new(db)
    }

    fn user(name: &str) -> User {
        User::new(
            name.into(),
            "hash".into(),
            UserRole::User,
            true,
            format!("{name}@example.com"),
        )
    }

    #[tokio::test]
    async fn test_save_and_load_aggregate() {
        let repo = repo().await;
        let mut u = user("alice");
        u.profile = Some(UserProfile::new("Alice", "Liddell"));
        u.auth = Some(UserAuth {
            github: Some(GithubAuth {
                gh_id: "gh_1".into(),
                display_name: "alice".into(),
            }),
            ..Default::default()
        });

        let saved = repo.save(u).await.unwrap();
        let id = saved.id.unwrap();

        let loaded = repo.find_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.profile.unwrap().full_name, "Alice Liddell");
        let auth = loaded.auth.unwrap();
        assert_eq!(auth.github.unwrap().gh_id, "gh_1");
        assert!(auth.google.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_nested_rows() {
        let repo = repo().await;
        let mut saved = repo.save(user("bob")).await.unwrap();

        saved.profile = Some(UserProfile::new("Bob", "Builder"));
        saved.role = UserRole::Admin;
        let updated = repo.save(saved).await.unwrap();

        let loaded = repo
            .find_by_username_or_email("bob@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, updated.id);
        assert_eq!(loaded.role, UserRole::Admin);
        assert_eq!(loaded.profile.unwrap().first_name, "Bob");
        assert!(loaded.auth.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = repo().await;
        repo.save(user("carol")).await.unwrap();

        let mut dup = user("carol");
        dup.email = "someone-else@example.com".into();
        let err = repo.save(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_aggregate() {
        let repo = repo().await;
        let mut u = user("dave");
        u.profile = Some(UserProfile::new("Dave", "Grohl"));
        let id = repo.save(u).await.unwrap().id.unwrap();

        let removed = repo.delete(id).await.unwrap();
        assert_eq!(removed.username, "dave");
        assert_eq!(removed.profile.unwrap().full_name, "Dave Grohl");

        assert!(repo.find_user_by_id(id).await.unwrap().is_none());
        assert!(user_profile::Entity::find_by_id(id)
            .one(&repo.db)
            .await
            .unwrap()
            .is_none());

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_user_applies_change() {
        let repo = repo().await;
        let id = repo.save(user("erin")).await.unwrap().id.unwrap();

        let updated = repo
            .update_user(
                id,
                Box::new(|u: &mut User| {
                    u.role = UserRole::Admin;
                    u.profile = Some(UserProfile::new("Erin", "Brockovich"));
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.role, UserRole::Admin);

        let loaded = repo.find_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.profile.unwrap().full_name, "Erin Brockovich");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = repo().await;
        let err = repo
            .update_user(404, Box::new(|u: &mut User| u.is_active = false))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { field: "id", .. }));
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_both_identities() {
        let repo = repo().await;
        let id = repo.save(user("frank")).await.unwrap().id.unwrap();

        let github = repo.update_user(
            id,
            Box::new(|u: &mut User| {
                u.auth.get_or_insert_with(UserAuth::default).github = Some(GithubAuth {
                    gh_id: "gh".into(),
                    display_name: "frank".into(),
                });
            }),
        );
        let google = repo.update_user(
            id,
            Box::new(|u: &mut User| {
                u.auth.get_or_insert_with(UserAuth::default).google = Some(GoogleAuth {
                    google_id: "g".into(),
                    display_name: "frank".into(),
                });
            }),
        );
        let (a, b) = tokio::join!(github, google);
        a.unwrap();
        b.unwrap();

        let auth = repo.find_user_by_id(id).await.unwrap().unwrap().auth.unwrap();
        assert_eq!(auth.github.unwrap().gh_id, "gh");
        assert_eq!(auth.google.unwrap().google_id, "g");
    }
}
