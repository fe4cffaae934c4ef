//! Alert inspection, acknowledgement, and scan commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use tabled::Tabled;
use uuid::Uuid;

use authwatch_core::error::AppError;
use authwatch_core::types::{TenantId, UserId};
use authwatch_entity::alert::{AcknowledgedAlertRecord, Alert};
use authwatch_service::{AlertQuery, RequestContext};
use authwatch_worker::AlertScanJob;

use crate::output::{self, OutputFormat, or_dash};

/// Arguments for alert commands
#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Alert subcommand
    #[command(subcommand)]
    pub command: AlertsCommand,
}

/// Alert subcommands
#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List real-time alerts and saved records for a tenant
    List {
        /// Tenant ID
        #[arg(long)]
        tenant: Uuid,
        /// List acknowledged records instead of unread ones
        #[arg(long)]
        acknowledged: bool,
        /// Evaluate as of this time instead of now
        #[arg(long, value_parser = super::parse_as_of)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Acknowledge an alert
    Ack {
        /// Tenant ID
        #[arg(long)]
        tenant: Uuid,
        /// Acting user ID
        #[arg(long)]
        user: Uuid,
        /// Real-time alert key or saved record ID
        #[arg(long)]
        alert_id: String,
        /// Evaluate as of this time instead of now
        #[arg(long, value_parser = super::parse_as_of)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Record unread alerts for one tenant or all tenants
    Scan {
        /// Only scan this tenant
        #[arg(long)]
        tenant: Option<Uuid>,
        /// Evaluate as of this time instead of now
        #[arg(long, value_parser = super::parse_as_of)]
        as_of: Option<DateTime<Utc>>,
    },
}

/// Table row for a real-time alert
#[derive(Debug, Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.to_string(),
            severity: alert.severity.as_str().to_string(),
            alert_type: alert.alert_type.as_str().to_string(),
            client: alert.authorization.client_name.clone(),
            message: alert.message.clone(),
        }
    }
}

/// Table row for a saved alert record
#[derive(Debug, Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Read At")]
    read_at: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&AcknowledgedAlertRecord> for RecordRow {
    fn from(record: &AcknowledgedAlertRecord) -> Self {
        Self {
            id: record.id.to_string(),
            severity: record.severity.as_str().to_string(),
            alert_type: record.alert_type.as_str().to_string(),
            read_at: or_dash(record.read_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())),
            message: record.message.clone(),
        }
    }
}

/// Execute alert commands
pub async fn execute(
    args: &AlertsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let service = super::open_alert_service(&config).await?;

    match &args.command {
        AlertsCommand::List {
            tenant,
            acknowledged,
            as_of,
        } => {
            let ctx = context(*tenant, None, *as_of);
            let feed = service
                .list_alerts(
                    &ctx,
                    AlertQuery {
                        acknowledged: *acknowledged,
                    },
                )
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&feed),
                OutputFormat::Table => {
                    output::print_heading("Active alerts");
                    let rows: Vec<AlertRow> = feed.alerts.iter().map(AlertRow::from).collect();
                    output::print_table(&rows);

                    let title = if *acknowledged {
                        "Acknowledged records"
                    } else {
                        "Unread records"
                    };
                    output::print_heading(title);
                    let rows: Vec<RecordRow> =
                        feed.saved_alerts.iter().map(RecordRow::from).collect();
                    output::print_table(&rows);

                    let summary = feed.summary;
                    output::print_heading("Summary");
                    output::print_kv("Total", &summary.total.to_string());
                    output::print_kv("Critical", &summary.critical.to_string());
                    output::print_kv("High", &summary.high.to_string());
                    output::print_kv("Warning", &summary.warning.to_string());
                    output::print_kv("Expiring", &summary.expiring.to_string());
                    output::print_kv("Low units", &summary.low_units.to_string());
                }
            }
        }
        AlertsCommand::Ack {
            tenant,
            user,
            alert_id,
            as_of,
        } => {
            let ctx = context(*tenant, Some(*user), *as_of);
            let record = service.acknowledge(&ctx, alert_id).await?;
            match format {
                OutputFormat::Json => output::print_json(&record),
                OutputFormat::Table => {
                    output::print_success(&format!("Alert '{alert_id}' acknowledged"));
                    output::print_kv("Record ID", &record.id.to_string());
                    output::print_kv("Authorization", &record.authorization_id.to_string());
                }
            }
        }
        AlertsCommand::Scan { tenant, as_of } => {
            let now = as_of.unwrap_or_else(Utc::now);
            match tenant {
                Some(tenant) => {
                    let report = service
                        .scan_tenant(TenantId::from_uuid(*tenant), now)
                        .await?;
                    match format {
                        OutputFormat::Json => output::print_json(&report),
                        OutputFormat::Table => {
                            output::print_success("Scan complete");
                            output::print_kv("Evaluated", &report.evaluated.to_string());
                            output::print_kv("Firing", &report.firing.to_string());
                            output::print_kv("Recorded", &report.recorded.to_string());
                            output::print_kv("Skipped", &report.skipped.to_string());
                        }
                    }
                }
                None => {
                    let summary = AlertScanJob::new(service.clone()).run(now).await?;
                    match format {
                        OutputFormat::Json => output::print_json(&summary),
                        OutputFormat::Table => {
                            output::print_success("Scan complete");
                            output::print_kv("Tenants", &summary.tenants.to_string());
                            output::print_kv("Recorded", &summary.recorded.to_string());
                            if summary.failed > 0 {
                                output::print_warning(&format!(
                                    "{} tenant(s) failed, see logs",
                                    summary.failed
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn context(tenant: Uuid, user: Option<Uuid>, as_of: Option<DateTime<Utc>>) -> RequestContext {
    let ctx = RequestContext::new(TenantId::from_uuid(tenant), user.map(UserId::from_uuid));
    match as_of {
        Some(now) => ctx.at(now),
        None => ctx,
    }
}
