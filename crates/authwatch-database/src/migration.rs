//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use authwatch_core::error::{AppError, ErrorKind};

/// Migrations compiled in from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// A migration known to the binary, and whether the database has applied it.
#[derive(Debug, Clone)]
pub struct MigrationState {
    /// Migration version (timestamp prefix of the file name).
    pub version: i64,
    /// Description from the file name.
    pub description: String,
    /// Whether the version is recorded in `_sqlx_migrations`.
    pub applied: bool,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Running database migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// List embedded migrations with their applied state.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationState>, AppError> {
    let applied: Vec<i64> = sqlx::query_scalar(
        "SELECT version FROM _sqlx_migrations WHERE success = TRUE ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .or_else(|e| match &e {
        // Table is created by the first run.
        sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01") => Ok(Vec::new()),
        _ => Err(AppError::with_source(
            ErrorKind::Database,
            "Failed to read migration history",
            e,
        )),
    })?;

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationState {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
