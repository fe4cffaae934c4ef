//! Periodic alert scan across all tenants.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use authwatch_core::error::AppError;
use authwatch_service::AlertService;

/// Totals for one scan run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertScanSummary {
    /// Tenants scanned successfully.
    pub tenants: usize,
    /// Tenants whose scan failed.
    pub failed: usize,
    /// Unread records written.
    pub recorded: usize,
}

/// Scans every tenant with active authorizations and records firing alerts.
#[derive(Debug, Clone)]
pub struct AlertScanJob {
    service: Arc<AlertService>,
}

impl AlertScanJob {
    /// Create a new scan job.
    pub fn new(service: Arc<AlertService>) -> Self {
        Self { service }
    }

    /// Run one scan as of `now`.
    ///
    /// A failing tenant is logged and counted; the remaining tenants are
    /// still scanned. Only failing to list tenants aborts the run.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<AlertScanSummary, AppError> {
        let tenants = self.service.active_tenants().await?;
        let mut summary = AlertScanSummary::default();

        for tenant_id in tenants {
            match self.service.scan_tenant(tenant_id, now).await {
                Ok(report) => {
                    summary.tenants += 1;
                    summary.recorded += report.recorded;
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(tenant_id = %tenant_id, error = %e, "Alert scan failed for tenant");
                }
            }
        }

        tracing::info!(
            tenants = summary.tenants,
            failed = summary.failed,
            recorded = summary.recorded,
            "Alert scan finished"
        );
        Ok(summary)
    }
}
