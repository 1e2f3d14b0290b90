//! User accounts service bootstrap.
//!
//! Reads configuration from a TOML file (~/.config/user-accounts/config.toml),
//! prepares the database, seeds the default administrator, prints the GraphQL
//! SDL and logs user events until Ctrl+C.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use user_accounts::config::LogFormat;
use user_accounts::{build_schema, default_config_path, AppConfig, AppState};

fn init_logging(cfg: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));

    match cfg.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ACCOUNTS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_logging(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting user accounts service...");
    info!("Database: {}", app_cfg.database.url);

    // ── Database & services ────────────────────────────────────
    let state = match AppState::from_config(&app_cfg).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = state.ensure_default_admin(&app_cfg.admin).await {
        error!("Failed to create admin user: {}", e);
    }

    let schema = build_schema(&state);
    println!("{}", schema.sdl());

    // ── Event log ──────────────────────────────────────────────
    let mut subscriber = state.event_bus.subscribe();
    let event_log = tokio::spawn(async move {
        while let Some(message) = subscriber.recv().await {
            info!(
                event_id = %message.id,
                event_type = message.event.event_type(),
                user_id = ?message.event.user_id(),
                "User event"
            );
        }
    });

    info!("Ready. Press Ctrl+C to shutdown.");
    tokio::signal::ctrl_c().await?;

    event_log.abort();
    info!("User accounts service shutdown complete");
    Ok(())
}
