use validator::Validate;

#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileInput {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Federated identities to link. Absent entries are left as they are.
#[derive(Debug, Clone, Default)]
pub struct AuthInput {
    pub certificate: Option<CertificateInput>,
    pub facebook: Option<FacebookInput>,
    pub linkedin: Option<LinkedInInput>,
    pub google: Option<GoogleInput>,
    pub github: Option<GithubInput>,
}

#[derive(Debug, Clone)]
pub struct CertificateInput {
    pub serial: String,
}

#[derive(Debug, Clone)]
pub struct FacebookInput {
    pub fb_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct LinkedInInput {
    pub ln_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct GoogleInput {
    pub google_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct GithubInput {
    pub gh_id: String,
    pub display_name: String,
}
