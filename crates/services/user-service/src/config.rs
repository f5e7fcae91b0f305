//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig};

/// Backing store for user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Process-local collection, lost on restart
    #[default]
    Memory,
    /// SeaORM over `DATABASE_URL`
    Database,
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "database" | "postgres" => Ok(StoreKind::Database),
            other => Err(AppError::internal(format!(
                "USER_STORE must be 'memory' or 'database', got '{}'",
                other
            ))),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub store: StoreKind,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let store = match env::var("USER_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreKind::default(),
        };

        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_else(|_| DatabaseConfig::default().url),
        };

        Ok(Self {
            store,
            database,
            jwt: JwtConfig::from_env()?,
        })
    }
}
