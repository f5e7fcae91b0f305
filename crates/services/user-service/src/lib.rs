//! User Service Library
//!
//! Account storage and the account use cases: registration, login, profile
//! edits, role management and deletion. The HTTP gateway embeds it directly.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppError, AppResult};
use domain::{Argon2PasswordEncoder, PasswordEncoder};

pub use crate::infra::{MigrateAction, MigrationState};

use crate::config::{StoreKind, UserServiceConfig};
use crate::infra::Database;
use crate::repository::{CollectionUserRepository, UserRepository, UserStore};
use crate::service::{AuthService, Authenticator, UserManager, UserService};

/// Wired services shared by request handlers.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
    /// Present when the database store is in use
    pub database: Option<Database>,
}

impl Services {
    /// Wire services over an existing repository.
    pub fn with_repository(repo: Arc<dyn UserRepository>, config: &UserServiceConfig) -> Self {
        let encoder: Arc<dyn PasswordEncoder> = Arc::new(Argon2PasswordEncoder::new());
        Self {
            users: Arc::new(UserManager::new(repo.clone(), encoder.clone())),
            auth: Arc::new(Authenticator::new(repo, encoder, config.jwt.clone())),
            database: None,
        }
    }

    /// Build the configured store and wire services over it.
    pub async fn from_config(config: &UserServiceConfig) -> AppResult<Self> {
        match config.store {
            StoreKind::Memory => {
                info!("Using in-memory user store");
                Ok(Self::with_repository(
                    Arc::new(CollectionUserRepository::new()),
                    config,
                ))
            }
            StoreKind::Database => {
                let db = Database::connect(&config.database.url).await?;
                let mut services =
                    Self::with_repository(Arc::new(UserStore::new(db.connection())), config);
                services.database = Some(db);
                Ok(services)
            }
        }
    }
}

/// Run a migration action against the configured database.
///
/// Returns the migration report for `Status`, empty otherwise.
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> AppResult<Vec<MigrationState>> {
    if config.store != StoreKind::Database {
        return Err(AppError::internal(
            "migrations require USER_STORE=database",
        ));
    }

    Database::open(&config.database.url).await?.apply(action).await
}
