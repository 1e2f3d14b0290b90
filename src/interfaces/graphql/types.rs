//! GraphQL output types

use async_graphql::{Enum, SimpleObject};

use crate::application::{AuthResult, UserPayload as ServicePayload};
use crate::domain::{self as model, UserUpdatedEvent};

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "UserRole")]
pub enum Role {
    Admin,
    User,
}

impl From<model::UserRole> for Role {
    fn from(role: model::UserRole) -> Self {
        match role {
            model::UserRole::Admin => Role::Admin,
            model::UserRole::User => Role::User,
        }
    }
}

impl From<Role> for model::UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => model::UserRole::Admin,
            Role::User => model::UserRole::User,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub email: String,
    pub profile: Option<UserProfile>,
    pub auth: Option<UserAuth>,
}

impl From<model::User> for User {
    fn from(user: model::User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username,
            role: user.role.into(),
            is_active: user.is_active,
            email: user.email,
            profile: user.profile.map(UserProfile::from),
            auth: user.auth.map(UserAuth::from),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<model::UserProfile> for UserProfile {
    fn from(profile: model::UserProfile) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name: profile.full_name,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct CertificateAuth {
    pub serial: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct FacebookAuth {
    pub fb_id: String,
    pub display_name: String,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "LinkedInAuth")]
pub struct LinkedInAuth {
    pub ln_id: String,
    pub display_name: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct GoogleAuth {
    pub google_id: String,
    pub display_name: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct GithubAuth {
    pub gh_id: String,
    pub display_name: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct UserAuth {
    pub certificate: Option<CertificateAuth>,
    pub facebook: Option<FacebookAuth>,
    pub linkedin: Option<LinkedInAuth>,
    pub google: Option<GoogleAuth>,
    pub github: Option<GithubAuth>,
}

impl From<model::UserAuth> for UserAuth {
    fn from(auth: model::UserAuth) -> Self {
        Self {
            certificate: auth.certificate.map(|c| CertificateAuth { serial: c.serial }),
            facebook: auth.facebook.map(|f| FacebookAuth {
                fb_id: f.fb_id,
                display_name: f.display_name,
            }),
            linkedin: auth.linkedin.map(|l| LinkedInAuth {
                ln_id: l.ln_id,
                display_name: l.display_name,
            }),
            google: auth.google.map(|g| GoogleAuth {
                google_id: g.google_id,
                display_name: g.display_name,
            }),
            github: auth.github.map(|g| GithubAuth {
                gh_id: g.gh_id,
                display_name: g.display_name,
            }),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct UserPayload {
    pub user: User,
}

impl From<ServicePayload> for UserPayload {
    fn from(payload: ServicePayload) -> Self {
        Self {
            user: payload.user.into(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct AuthPayload {
    pub user: User,
    pub tokens: Tokens,
}

impl From<AuthResult> for AuthPayload {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user.into(),
            tokens: Tokens {
                access_token: result.tokens.access_token,
                refresh_token: result.tokens.refresh_token,
            },
        }
    }
}

/// Kind of change reported by `usersUpdated`
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "UserMutation")]
pub enum Mutation {
    AddUser,
    EditUser,
    DeleteUser,
}

impl From<model::UserMutation> for Mutation {
    fn from(mutation: model::UserMutation) -> Self {
        match mutation {
            model::UserMutation::AddUser => Mutation::AddUser,
            model::UserMutation::EditUser => Mutation::EditUser,
            model::UserMutation::DeleteUser => Mutation::DeleteUser,
        }
    }
}

/// Item of the `usersUpdated` subscription
#[derive(SimpleObject, Clone, Debug)]
pub struct UpdateUserPayload {
    pub mutation: Mutation,
    pub node: User,
}

impl From<UserUpdatedEvent> for UpdateUserPayload {
    fn from(event: UserUpdatedEvent) -> Self {
        Self {
            mutation: event.mutation.into(),
            node: event.user.into(),
        }
    }
}
