//! Authorization usage detail command.

use chrono::{DateTime, Utc};
use clap::Args;
use uuid::Uuid;

use authwatch_core::error::AppError;
use authwatch_core::types::{AuthorizationId, TenantId};
use authwatch_service::RequestContext;

use crate::output::{self, OutputFormat, or_dash};

/// Arguments for the usage command
#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Tenant ID
    #[arg(long)]
    pub tenant: Uuid,

    /// Authorization ID
    #[arg(long)]
    pub authorization: Uuid,

    /// Evaluate as of this time instead of now
    #[arg(long, value_parser = super::parse_as_of)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Execute the usage command
pub async fn execute(
    args: &UsageArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let service = super::open_alert_service(&config).await?;

    let mut ctx = RequestContext::new(TenantId::from_uuid(args.tenant), None);
    if let Some(as_of) = args.as_of {
        ctx = ctx.at(as_of);
    }

    let usage = service
        .authorization_usage(&ctx, AuthorizationId::from_uuid(args.authorization))
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&usage),
        OutputFormat::Table => {
            println!("Authorization {}", usage.authorization_id);
            output::print_kv("Used units", &usage.used_units.to_string());
            output::print_kv("Authorized units", &or_dash(usage.authorized_units));
            output::print_kv(
                "Usage",
                &or_dash(usage.usage_percentage.map(|p| format!("{p:.1}%"))),
            );
            output::print_kv("Remaining units", &or_dash(usage.remaining_units));
            output::print_kv("End date", &or_dash(usage.end_date));
            output::print_kv("Days remaining", &or_dash(usage.days_remaining));
            output::print_kv("Expiring soon", &usage.is_expiring_soon.to_string());
            output::print_kv("Expired", &usage.is_expired.to_string());
            output::print_kv("Nearing limit", &usage.is_nearing_limit.to_string());
        }
    }

    Ok(())
}
