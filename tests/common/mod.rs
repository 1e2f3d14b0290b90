#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use serde_json::Value;

use user_accounts::config::{AdminSection, AppConfig, DatabaseSection};
use user_accounts::{build_schema, AppSchema, AppState};

pub const ADMIN_PASSWORD: &str = "admin123";

/// Schema backed by a fresh in-memory SQLite database, seeded with the
/// default admin (id 1).
pub async fn setup() -> (AppSchema, AppState) {
    let mut config = AppConfig::default();
    config.database = DatabaseSection {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    config.security.bcrypt_cost = 4;
    config.admin = AdminSection {
        enabled: true,
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };

    let state = AppState::from_config(&config).await.expect("init state");
    state
        .ensure_default_admin(&config.admin)
        .await
        .expect("seed admin");

    (build_schema(&state), state)
}

pub async fn execute(schema: &AppSchema, query: &str, variables: Value) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

/// Data of a response that must have succeeded.
pub fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("data as json")
}

/// `extensions.code` of the first error.
pub fn error_code(response: &Response) -> String {
    assert!(!response.errors.is_empty(), "expected an error");
    let error = serde_json::to_value(&response.errors[0]).expect("error as json");
    error["extensions"]["code"]
        .as_str()
        .expect("error code")
        .to_string()
}

pub const USER_FIELDS: &str = r#"
    id
    username
    role
    isActive
    email
    profile { firstName lastName fullName }
    auth {
        certificate { serial }
        facebook { fbId displayName }
        linkedin { lnId displayName }
        google { googleId displayName }
        github { ghId displayName }
    }
"#;
