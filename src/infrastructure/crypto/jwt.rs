//! JWT Token handling
//!
//! Access tokens carry the user identity snapshot and are signed with the
//! configured secret. Refresh tokens carry only the subject and are signed
//! with the secret concatenated with the user's password hash, so a
//! password change invalidates every outstanding refresh token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, JwtUserIdentity, TokenIssuer, Tokens};
use crate::support::InfraError;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token lifetime in minutes
    pub access_token_expiration_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiration_days: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            access_token_expiration_minutes: 60,
            refresh_token_expiration_days: 7,
            issuer: "user-accounts".to_string(),
        }
    }
}

/// Claims of an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    pub typ: String,
}

impl AccessClaims {
    pub fn new(identity: &JwtUserIdentity, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(config.access_token_expiration_minutes);

        Self {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            role: identity.role.as_str().to_string(),
            is_active: identity.is_active,
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            typ: ACCESS_TOKEN_TYPE.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "ADMIN"
    }
}

/// Claims of a refresh token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub typ: String,
}

impl RefreshClaims {
    pub fn new(identity: &JwtUserIdentity, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(config.refresh_token_expiration_days);

        Self {
            sub: identity.id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            typ: REFRESH_TOKEN_TYPE.to_string(),
        }
    }
}

/// Issues and verifies access/refresh token pairs
#[derive(Clone)]
pub struct JwtGenerator {
    config: JwtConfig,
}

impl JwtGenerator {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn refresh_secret(&self, password_hash: &str) -> String {
        format!("{}{}", self.config.secret, password_hash)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation
    }

    pub fn create_access_token(
        &self,
        identity: &JwtUserIdentity,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            &AccessClaims::new(identity, &self.config),
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
    }

    pub fn create_refresh_token(
        &self,
        identity: &JwtUserIdentity,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            &RefreshClaims::new(identity, &self.config),
            &EncodingKey::from_secret(self.refresh_secret(&identity.password_hash).as_bytes()),
        )
    }

    /// Verify and decode an access token
    pub fn verify_access_token(
        &self,
        token: &str,
    ) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &self.validation(),
        )?;

        if data.claims.typ != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(data.claims)
    }

    /// Verify a refresh token against the user's current password hash
    pub fn verify_refresh_token(
        &self,
        token: &str,
        password_hash: &str,
    ) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
        let data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh_secret(password_hash).as_bytes()),
            &self.validation(),
        )?;

        if data.claims.typ != REFRESH_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(data.claims)
    }
}

impl TokenIssuer for JwtGenerator {
    fn generate_tokens(&self, identity: &JwtUserIdentity) -> DomainResult<Tokens> {
        let access_token = self.create_access_token(identity).map_err(InfraError::from)?;
        let refresh_token = self
            .create_refresh_token(identity)
            .map_err(InfraError::from)?;

        Ok(Tokens {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn identity() -> JwtUserIdentity {
        JwtUserIdentity {
            id: 1,
            username: "testuser".into(),
            password_hash: "$2b$04$hash".into(),
            role: UserRole::Admin,
            is_active: true,
            email: "test@example.com".into(),
            first_name: Some("Test".into()),
            last_name: None,
        }
    }

    fn generator() -> JwtGenerator {
        JwtGenerator::new(JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        })
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let generator = generator();
        let tokens = generator.generate_tokens(&identity()).unwrap();

        let claims = generator.verify_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.first_name.as_deref(), Some("Test"));
        assert!(claims.is_admin());
    }

    #[test]
    fn test_refresh_token_bound_to_password_hash() {
        let generator = generator();
        let tokens = generator.generate_tokens(&identity()).unwrap();

        let claims = generator
            .verify_refresh_token(&tokens.refresh_token, "$2b$04$hash")
            .unwrap();
        assert_eq!(claims.sub, "1");

        assert!(generator
            .verify_refresh_token(&tokens.refresh_token, "$2b$04$changed")
            .is_err());
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let generator = generator();
        let tokens = generator.generate_tokens(&identity()).unwrap();

        assert!(generator.verify_access_token(&tokens.refresh_token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let result = generator().verify_access_token("invalid-token");
        assert!(result.is_err());
    }
}
