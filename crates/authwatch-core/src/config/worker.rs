//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled alert scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the alert scan.
    #[serde(default = "default_alert_scan_cron")]
    pub alert_scan_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alert_scan_cron: default_alert_scan_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_alert_scan_cron() -> String {
    "0 0 * * * *".to_string()
}
