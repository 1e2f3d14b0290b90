//! GraphQL input types and their conversion into domain DTOs

use async_graphql::InputObject;

use crate::domain::user as dto;

use super::types::Role;

#[derive(InputObject, Debug)]
pub struct ProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<ProfileInput> for dto::ProfileInput {
    fn from(input: ProfileInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }
}

#[derive(InputObject, Debug)]
pub struct CertificateInput {
    pub serial: String,
}

#[derive(InputObject, Debug)]
pub struct FacebookInput {
    pub fb_id: String,
    pub display_name: String,
}

#[derive(InputObject, Debug)]
#[graphql(name = "LinkedInInput")]
pub struct LinkedInInput {
    pub ln_id: String,
    pub display_name: String,
}

#[derive(InputObject, Debug)]
pub struct GoogleInput {
    pub google_id: String,
    pub display_name: String,
}

#[derive(InputObject, Debug)]
pub struct GithubInput {
    pub gh_id: String,
    pub display_name: String,
}

#[derive(InputObject, Debug)]
pub struct AuthInput {
    pub certificate: Option<CertificateInput>,
    pub facebook: Option<FacebookInput>,
    pub linkedin: Option<LinkedInInput>,
    pub google: Option<GoogleInput>,
    pub github: Option<GithubInput>,
}

impl From<AuthInput> for dto::AuthInput {
    fn from(input: AuthInput) -> Self {
        Self {
            certificate: input.certificate.map(|c| dto::CertificateInput { serial: c.serial }),
            facebook: input.facebook.map(|f| dto::FacebookInput {
                fb_id: f.fb_id,
                display_name: f.display_name,
            }),
            linkedin: input.linkedin.map(|l| dto::LinkedInInput {
                ln_id: l.ln_id,
                display_name: l.display_name,
            }),
            google: input.google.map(|g| dto::GoogleInput {
                google_id: g.google_id,
                display_name: g.display_name,
            }),
            github: input.github.map(|g| dto::GithubInput {
                gh_id: g.gh_id,
                display_name: g.display_name,
            }),
        }
    }
}

#[derive(InputObject, Debug)]
pub struct AddUserInput {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub is_active: Option<bool>,
    pub email: String,
    pub profile: Option<ProfileInput>,
    pub auth: Option<AuthInput>,
}

impl From<AddUserInput> for dto::AddUserInput {
    fn from(input: AddUserInput) -> Self {
        Self {
            username: input.username,
            password: input.password,
            role: input.role.into(),
            is_active: input.is_active,
            email: input.email,
            profile: input.profile.map(Into::into),
            auth: input.auth.map(Into::into),
        }
    }
}

#[derive(InputObject, Debug)]
pub struct EditUserInput {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub is_active: Option<bool>,
    pub email: String,
    pub password: Option<String>,
    pub profile: Option<ProfileInput>,
    pub auth: Option<AuthInput>,
}

impl From<EditUserInput> for dto::EditUserInput {
    fn from(input: EditUserInput) -> Self {
        Self {
            id: input.id,
            username: input.username,
            role: input.role.into(),
            is_active: input.is_active,
            email: input.email,
            password: input.password,
            profile: input.profile.map(Into::into),
            auth: input.auth.map(Into::into),
        }
    }
}

#[derive(InputObject, Debug)]
pub struct LoginUserInput {
    pub username_or_email: String,
    pub password: String,
}

impl From<LoginUserInput> for dto::LoginUserInput {
    fn from(input: LoginUserInput) -> Self {
        Self {
            username_or_email: input.username_or_email,
            password: input.password,
        }
    }
}

#[derive(InputObject, Debug)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterUserInput> for dto::RegisterUserInput {
    fn from(input: RegisterUserInput) -> Self {
        Self {
            username: input.username,
            email: input.email,
            password: input.password,
        }
    }
}

#[derive(InputObject, Debug)]
pub struct ForgotPasswordInput {
    pub email: String,
}

impl From<ForgotPasswordInput> for dto::ForgotPasswordInput {
    fn from(input: ForgotPasswordInput) -> Self {
        Self { email: input.email }
    }
}

#[derive(InputObject, Debug)]
pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

impl From<ResetPasswordInput> for dto::ResetPasswordInput {
    fn from(input: ResetPasswordInput) -> Self {
        Self {
            token: input.token,
            password: input.password,
            password_confirmation: input.password_confirmation,
        }
    }
}
