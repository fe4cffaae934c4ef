//! Database migration management commands.

use clap::{Args, Subcommand};

use authwatch_core::error::AppError;
use authwatch_database::DatabasePool;
use authwatch_database::migration::{migration_status, run_migrations};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            println!("Migration status:");
            for entry in migration_status(pool.pool()).await? {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("  {} - {} ({})", entry.version, entry.description, state);
            }
        }
    }

    pool.close().await;
    Ok(())
}
