//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use authwatch_core::config::StoreBackend;
use authwatch_core::error::AppError;
use authwatch_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file and environment overrides
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(config_path)?;
            config.database.url = mask_password(&config.database.url);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv("Server", &config.server.bind_address());
                let store = match config.database.backend {
                    StoreBackend::Postgres => mask_password(&config.database.url),
                    StoreBackend::Memory => "in-memory".to_string(),
                };
                output::print_kv("Store", &store);
                let expiry = config.alerts.thresholds.expiry;
                output::print_kv(
                    "Expiry tiers (days)",
                    &format!(
                        "{} / {} / {}",
                        expiry.critical_days, expiry.high_days, expiry.warning_days
                    ),
                );
                let usage = config.alerts.thresholds.usage;
                output::print_kv(
                    "Usage tiers (%)",
                    &format!("{} / {}", usage.warning_percent, usage.high_percent),
                );
                output::print_kv(
                    "Acknowledgement",
                    &format!("{:?}", config.alerts.acknowledgement).to_lowercase(),
                );
                if config.worker.enabled {
                    output::print_kv("Alert scan", &config.worker.alert_scan_cron);
                } else {
                    output::print_warning("Scheduled alert scan is disabled");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
