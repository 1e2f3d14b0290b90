use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found with {field}={value}")]
    UserNotFound { field: &'static str, value: String },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    pub fn user_not_found_by_id(id: i32) -> Self {
        Self::UserNotFound {
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn user_not_found_by_login(username_or_email: &str) -> Self {
        Self::UserNotFound {
            field: "usernameOrEmail",
            value: username_or_email.to_string(),
        }
    }

    /// Stable machine-readable code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) | Self::Crypto(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        field_errors.sort();

        if field_errors.is_empty() {
            // nested struct errors only
            Self::Validation(errors.to_string())
        } else {
            Self::Validation(field_errors.join("; "))
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Database(e) => {
                let msg = e.to_string();
                if msg.contains("UNIQUE") || msg.contains("duplicate") {
                    DomainError::Conflict("Username or email already exists".to_string())
                } else {
                    DomainError::Storage(msg)
                }
            }
            other => DomainError::Crypto(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        InfraError::from(err).into()
    }
}
