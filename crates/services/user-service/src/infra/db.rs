//! Postgres handle for the user store.
//!
//! Connection errors and migration failures surface as [`AppError`] so the
//! CLI and the health check report them like any other failure.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, Statement};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use common::{AppError, AppResult};

use super::migrations::Migrator;

/// Schema change requested from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Revert the newest applied migration
    Down,
    /// Report applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

/// One entry of the migration report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection to the account database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let db = Self::open(database_url).await?;
        db.apply(MigrateAction::Up).await?;
        tracing::info!("Database connected and schema up to date");
        Ok(db)
    }

    /// Open the pool without touching the schema.
    pub async fn open(database_url: &str) -> AppResult<Self> {
        let connection = SeaDatabase::connect(database_url).await?;
        Ok(Self { connection })
    }

    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Handle for repositories; clones share the pool.
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run `action`; only `Status` returns a non-empty report.
    pub async fn apply(&self, action: MigrateAction) -> AppResult<Vec<MigrationState>> {
        let conn = &self.connection;
        match action {
            MigrateAction::Up => Migrator::up(conn, None).await?,
            MigrateAction::Down => Migrator::down(conn, Some(1)).await?,
            MigrateAction::Fresh => Migrator::fresh(conn).await?,
            MigrateAction::Status => {
                return Ok(Migrator::get_migration_with_status(conn)
                    .await?
                    .iter()
                    .map(|m| MigrationState {
                        name: m.name().to_string(),
                        applied: matches!(m.status(), MigrationStatus::Applied),
                    })
                    .collect())
            }
        }

        tracing::info!(?action, "Migration action applied");
        Ok(Vec::new())
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> AppResult<()> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map_err(|e| AppError::internal(format!("database ping failed: {}", e)))?;
        Ok(())
    }
}
