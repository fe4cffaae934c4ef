//! Application builder and server bootstrap.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;

use authwatch_core::config::{AppConfig, StoreBackend};
use authwatch_core::error::AppError;
use authwatch_database::migration::run_migrations;
use authwatch_database::{
    AlertRecordRepository, AlertRecordStore, AuthorizationRepository, AuthorizationStore,
    DatabasePool, MemoryAlertRecordStore, MemoryAuthorizationStore,
};
use authwatch_service::AlertService;
use authwatch_worker::{AlertScanJob, CronScheduler};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The store pair backing the alert service.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Authorization reads.
    pub authorizations: Arc<dyn AuthorizationStore>,
    /// Alert record reads and writes.
    pub records: Arc<dyn AlertRecordStore>,
    /// Pool to close on shutdown, when backed by PostgreSQL.
    pub pool: Option<DatabasePool>,
}

/// Opens the stores selected by `database.backend`, running migrations
/// first when configured.
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                run_migrations(pool.pool()).await?;
            }
            Ok(Stores {
                authorizations: Arc::new(AuthorizationRepository::new(pool.pool().clone())),
                records: Arc::new(AlertRecordRepository::new(pool.pool().clone())),
                pool: Some(pool),
            })
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; records are lost on restart");
            Ok(Stores {
                authorizations: Arc::new(MemoryAuthorizationStore::new()),
                records: Arc::new(MemoryAlertRecordStore::new()),
                pool: None,
            })
        }
    }
}

/// Runs the AuthWatch server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthWatch server...");

    // ── Step 1: Stores ───────────────────────────────────────────
    let stores = open_stores(&config).await?;

    // ── Step 2: Services ─────────────────────────────────────────
    let alert_service = Arc::new(AlertService::new(
        Arc::clone(&stores.authorizations),
        Arc::clone(&stores.records),
        &config.alerts,
    ));

    // ── Step 3: Scheduler ────────────────────────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new(AlertScanJob::new(Arc::clone(&alert_service))).await?;
        scheduler.register_tasks(&config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled; alert scans will not run");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, alert_service));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthWatch server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Shutdown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(result) => result?,
            Err(_) => tracing::warn!("Scheduler did not stop within the grace period"),
        }
    }
    if let Some(pool) = stores.pool {
        pool.close().await;
    }

    tracing::info!("AuthWatch server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
