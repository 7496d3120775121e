pub mod catalog;
pub mod export;
pub mod worksheet;

use crate::error::{ConfigError, InitializationError};
use crate::worksheet::WorksheetConfig;
use crate::worksheet::bacs::BacsThresholds;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

pub const ENV_VAR_PREFIX: &str = "POWER_BUDGET__";
pub const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub bacs: BacsThresholds,
    pub worksheet: WorksheetConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: "sqlite://equipements.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            connection_string: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Every connection to an in-memory database sees its own empty database.
    fn is_in_memory(&self) -> bool {
        self.connection_string.contains(":memory:") || self.connection_string.contains("mode=memory")
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
        .extract::<Config>()?)
}

pub mod error {
    use thiserror::Error;
    use tracing::dispatcher::SetGlobalDefaultError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] SetGlobalDefaultError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error(transparent)]
        Db(#[from] sqlx::Error),
        #[error(transparent)]
        Query(#[from] crate::catalog::QueryError),
    }
}

#[instrument(skip_all, fields(connection_string = %db_config.connection_string))]
pub async fn initialize_db(db_config: &DatabaseConfig) -> Result<Pool<Sqlite>, InitializationError> {
    let options = SqliteConnectOptions::from_str(&db_config.connection_string)?.foreign_keys(true);

    let pool_options = if db_config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(db_config.max_connections)
    };
    let pool = pool_options.connect_with(options).await?;

    info!(name: "db.connected", "db pool created and connected");

    prepare_catalog(&pool).await?;

    Ok(pool)
}

/// Applies pending migrations and seeds the catalog when it is empty. Returns whether seeding
/// happened. Safe to call repeatedly.
pub async fn prepare_catalog(pool: &Pool<Sqlite>) -> Result<bool, InitializationError> {
    sqlx::migrate!("../migrations").run(pool).await?;

    let seeded = catalog::seed::seed_if_empty(pool).await?;

    let missing = catalog::queries::categories_missing_seasonal_coverage(pool).await?;
    if !missing.is_empty() {
        warn!(categories = ?missing, "seasonal coefficients do not cover all twelve months");
    }

    Ok(seeded)
}

pub async fn shutdown_listener(token: Option<CancellationToken>) {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        _ = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }

    if let Some(token) = token {
        token.cancel();
    }
}
