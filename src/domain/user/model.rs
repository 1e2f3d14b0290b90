use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthInput, ProfileInput};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

/// User aggregate root
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// `None` until the repository has stored the user for the first time.
    pub id: Option<i32>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub profile: Option<UserProfile>,
    pub auth: Option<UserAuth>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        password_hash: String,
        role: UserRole,
        is_active: bool,
        email: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username,
            email,
            password_hash,
            role,
            is_active,
            profile: None,
            auth: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Patch the profile, creating it when the user has none yet.
    pub fn merge_profile(&mut self, input: ProfileInput) {
        match self.profile.as_mut() {
            Some(profile) => profile.patch(input),
            None => self.profile = Some(UserProfile::from(input)),
        }
    }

    /// Patch the federated identities, creating the bundle when absent.
    pub fn merge_auth(&mut self, input: AuthInput) {
        match self.auth.as_mut() {
            Some(auth) => auth.patch(input),
            None => self.auth = Some(UserAuth::from(input)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl UserProfile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let mut profile = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            full_name: String::new(),
        };
        profile.refresh_full_name();
        profile
    }

    pub fn patch(&mut self, input: ProfileInput) {
        if let Some(first_name) = input.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            self.last_name = last_name;
        }
        self.refresh_full_name();
    }

    fn refresh_full_name(&mut self) {
        self.full_name = format!("{} {}", self.first_name, self.last_name);
    }
}

impl From<ProfileInput> for UserProfile {
    fn from(input: ProfileInput) -> Self {
        Self::new(
            input.first_name.unwrap_or_default(),
            input.last_name.unwrap_or_default(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateAuth {
    pub serial: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookAuth {
    pub fb_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInAuth {
    pub ln_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAuth {
    pub google_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubAuth {
    pub gh_id: String,
    pub display_name: String,
}

/// Federated identities linked to a user
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuth {
    pub certificate: Option<CertificateAuth>,
    pub facebook: Option<FacebookAuth>,
    pub linkedin: Option<LinkedInAuth>,
    pub google: Option<GoogleAuth>,
    pub github: Option<GithubAuth>,
}

impl UserAuth {
    /// Overwrite only the identities present in `input`.
    pub fn patch(&mut self, input: AuthInput) {
        if let Some(cert) = input.certificate {
            self.certificate = Some(CertificateAuth {
                serial: cert.serial,
            });
        }
        if let Some(fb) = input.facebook {
            self.facebook = Some(FacebookAuth {
                fb_id: fb.fb_id,
                display_name: fb.display_name,
            });
        }
        if let Some(li) = input.linkedin {
            self.linkedin = Some(LinkedInAuth {
                ln_id: li.ln_id,
                display_name: li.display_name,
            });
        }
        if let Some(g) = input.google {
            self.google = Some(GoogleAuth {
                google_id: g.google_id,
                display_name: g.display_name,
            });
        }
        if let Some(gh) = input.github {
            self.github = Some(GithubAuth {
                gh_id: gh.gh_id,
                display_name: gh.display_name,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.certificate.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.google.is_none()
            && self.github.is_none()
    }
}

impl From<AuthInput> for UserAuth {
    fn from(input: AuthInput) -> Self {
        let mut auth = Self::default();
        auth.patch(input);
        auth
    }
}
