//! CLI command definitions and dispatch.

pub mod alerts;
pub mod config;
pub mod migrate;
pub mod serve;
pub mod usage;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};

use authwatch_core::config::{AppConfig, StoreBackend};
use authwatch_core::error::AppError;
use authwatch_service::AlertService;

use crate::output::OutputFormat;

/// AuthWatch: authorization usage and expiry alerting
#[derive(Debug, Parser)]
#[command(name = "authwatch", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the AuthWatch server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect, acknowledge, and scan alerts
    Alerts(alerts::AlertsArgs),
    /// Show usage detail for one authorization
    Usage(usage::UsageArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Alerts(args) => alerts::execute(args, &self.config, self.format).await,
            Commands::Usage(args) => usage::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build an alert service over the configured PostgreSQL stores
pub async fn open_alert_service(config: &AppConfig) -> Result<Arc<AlertService>, AppError> {
    if config.database.backend == StoreBackend::Memory {
        return Err(AppError::configuration(
            "This command reads persisted data and needs database.backend = \"postgres\"",
        ));
    }
    let stores = authwatch_api::open_stores(config).await?;
    Ok(Arc::new(AlertService::new(
        stores.authorizations,
        stores.records,
        &config.alerts,
    )))
}

/// Parse `--as-of`: RFC 3339 timestamp, or a date meaning midnight UTC.
pub fn parse_as_of(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got '{value}'"))
}
