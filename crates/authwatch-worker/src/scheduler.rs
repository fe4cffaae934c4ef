//! Cron scheduler for periodic alert scans.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use authwatch_core::config::WorkerConfig;
use authwatch_core::error::AppError;

use crate::jobs::AlertScanJob;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Scan job run on each tick.
    alert_scan: Arc<AlertScanJob>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(alert_scan: AlertScanJob) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            alert_scan: Arc::new(alert_scan),
        })
    }

    /// Register the scheduled tasks enabled in `config`.
    pub async fn register_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register_alert_scan(&config.alert_scan_cron).await?;
        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Alert scan on `schedule` (six-field cron, seconds first).
    pub async fn register_alert_scan(&self, schedule: &str) -> Result<(), AppError> {
        let alert_scan = Arc::clone(&self.alert_scan);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let alert_scan = Arc::clone(&alert_scan);
            Box::pin(async move {
                tracing::debug!("Running alert scan");
                if let Err(e) = alert_scan.run(Utc::now()).await {
                    tracing::error!("Alert scan failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid alert_scan schedule '{schedule}': {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add alert_scan schedule: {e}")))?;

        tracing::info!(schedule, "Registered: alert_scan");
        Ok(())
    }
}
