//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use authwatch_core::config::AppConfig;
use authwatch_service::AlertService;

/// Application state passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Alert evaluation and acknowledgement.
    pub alert_service: Arc<AlertService>,
    /// When the server started, for uptime reporting.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state around an already-wired alert service.
    pub fn new(config: AppConfig, alert_service: Arc<AlertService>) -> Self {
        Self {
            config: Arc::new(config),
            alert_service,
            started_at: Utc::now(),
        }
    }
}
