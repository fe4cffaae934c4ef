//! Store-backed alert operations: listing, acknowledgement, usage detail, and scans.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use authwatch_core::config::{AcknowledgementMode, AlertsConfig};
use authwatch_core::error::AppError;
use authwatch_core::types::{AuthorizationId, TenantId};
use authwatch_database::store::{AlertRecordStore, AuthorizationStore};
use authwatch_entity::alert::{AcknowledgedAlertRecord, Alert, AlertKey};

use crate::context::RequestContext;

use super::engine::AlertEngine;
use super::summary::AlertSummary;
use super::usage::AuthorizationUsage;

/// Filter for the alert listing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AlertQuery {
    /// `false` lists unread saved records, `true` lists acknowledged ones.
    #[serde(default)]
    pub acknowledged: bool,
}

/// Real-time alerts plus saved records for one tenant.
#[derive(Debug, Clone, Serialize)]
pub struct AlertFeed {
    /// Alerts computed for this request.
    pub alerts: Vec<Alert>,
    /// Persisted records matching the query.
    pub saved_alerts: Vec<AcknowledgedAlertRecord>,
    /// Counts over `alerts`.
    pub summary: AlertSummary,
}

/// Outcome of scanning one tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Active authorizations evaluated.
    pub evaluated: usize,
    /// Alerts currently firing.
    pub firing: usize,
    /// New unread records written.
    pub recorded: usize,
    /// Classification branches skipped for missing data.
    pub skipped: usize,
}

/// Evaluates tenant authorizations and manages alert records.
#[derive(Debug, Clone)]
pub struct AlertService {
    /// Classification engine.
    engine: AlertEngine,
    /// Authorization store (read-only).
    authorizations: Arc<dyn AuthorizationStore>,
    /// Alert record store.
    records: Arc<dyn AlertRecordStore>,
    /// How acknowledgements are persisted.
    acknowledgement: AcknowledgementMode,
    /// Maximum saved records per listing.
    saved_alert_limit: u32,
}

impl AlertService {
    /// Creates a new alert service.
    pub fn new(
        authorizations: Arc<dyn AuthorizationStore>,
        records: Arc<dyn AlertRecordStore>,
        config: &AlertsConfig,
    ) -> Self {
        Self {
            engine: AlertEngine::new(config.thresholds),
            authorizations,
            records,
            acknowledgement: config.acknowledgement,
            saved_alert_limit: config.saved_alert_limit,
        }
    }

    /// Checks that the authorization store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.authorizations.health_check().await
    }

    /// Tenants owning at least one active authorization.
    pub async fn active_tenants(&self) -> Result<Vec<TenantId>, AppError> {
        self.authorizations.list_tenants_with_active().await
    }

    /// Computes real-time alerts for the tenant and lists saved records.
    pub async fn list_alerts(
        &self,
        ctx: &RequestContext,
        query: AlertQuery,
    ) -> Result<AlertFeed, AppError> {
        let active = self.authorizations.list_active(ctx.tenant_id).await?;
        let evaluation = self.engine.evaluate(&active, ctx.request_time);

        let saved_alerts = self
            .records
            .list(ctx.tenant_id, query.acknowledged, self.saved_alert_limit)
            .await?;

        debug!(
            tenant_id = %ctx.tenant_id,
            authorizations = active.len(),
            alerts = evaluation.alerts.len(),
            saved = saved_alerts.len(),
            skipped = evaluation.skipped.len(),
            "Evaluated tenant alerts"
        );

        Ok(AlertFeed {
            alerts: evaluation.alerts,
            saved_alerts,
            summary: evaluation.summary,
        })
    }

    /// Acknowledges a real-time alert or a saved record on behalf of the acting user.
    ///
    /// A real-time alert must still be firing at `ctx.request_time` for an
    /// `ACTIVE` authorization of the tenant. The alert is resolved before the
    /// acting user is checked, so an unknown id is `NotFound` either way. The
    /// authorization is never modified.
    pub async fn acknowledge(
        &self,
        ctx: &RequestContext,
        alert_id: &str,
    ) -> Result<AcknowledgedAlertRecord, AppError> {
        let alert_id = alert_id.trim();
        if alert_id.is_empty() {
            return Err(AppError::validation("alertId is required"));
        }
        let not_found = || AppError::not_found(format!("Alert '{alert_id}' not found"));

        let key: AlertKey = alert_id.parse().map_err(|_| not_found())?;

        let record = match key {
            AlertKey::Realtime {
                authorization_id, ..
            } => {
                let alert = self
                    .firing_alert(ctx, &key, authorization_id)
                    .await?
                    .ok_or_else(not_found)?;
                let user_id = ctx.require_user()?;
                let record = AcknowledgedAlertRecord::acknowledged(
                    ctx.tenant_id,
                    &alert,
                    user_id,
                    ctx.request_time,
                );
                match self.acknowledgement {
                    AcknowledgementMode::Append => self.records.insert(record).await?,
                    AcknowledgementMode::Upsert => {
                        self.records.upsert_acknowledgement(record).await?
                    }
                }
            }
            AlertKey::Saved { record_id } => {
                self.records
                    .find_by_id(ctx.tenant_id, record_id)
                    .await?
                    .ok_or_else(not_found)?;
                let user_id = ctx.require_user()?;
                self.records
                    .mark_acknowledged(ctx.tenant_id, record_id, user_id, ctx.request_time)
                    .await?
                    .ok_or_else(not_found)?
            }
        };

        info!(
            tenant_id = %ctx.tenant_id,
            user_id = ?record.action_taken_by_id,
            alert_id,
            record_id = %record.id,
            alert_type = record.alert_type.as_str(),
            "Alert acknowledged"
        );

        Ok(record)
    }

    /// Usage and expiry detail for one of the tenant's authorizations.
    pub async fn authorization_usage(
        &self,
        ctx: &RequestContext,
        authorization_id: AuthorizationId,
    ) -> Result<AuthorizationUsage, AppError> {
        let authorization = self
            .authorizations
            .get_by_id(ctx.tenant_id, authorization_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Authorization {authorization_id} not found"))
            })?;

        Ok(self.engine.usage_detail(&authorization, ctx.request_time))
    }

    /// Records every currently firing alert for the tenant as an unread
    /// record, unless one is already waiting unread for the same
    /// authorization and alert type.
    pub async fn scan_tenant(
        &self,
        tenant_id: TenantId,
        now: DateTime<Utc>,
    ) -> Result<ScanReport, AppError> {
        let active = self.authorizations.list_active(tenant_id).await?;
        let evaluation = self.engine.evaluate(&active, now);

        let mut report = ScanReport {
            evaluated: active.len(),
            firing: evaluation.alerts.len(),
            recorded: 0,
            skipped: evaluation.skipped.len(),
        };

        for alert in &evaluation.alerts {
            let pending = self
                .records
                .has_unread(tenant_id, alert.authorization.id, alert.alert_type)
                .await?;
            if pending {
                continue;
            }
            self.records
                .insert(AcknowledgedAlertRecord::unread(tenant_id, alert, now))
                .await?;
            report.recorded += 1;
        }

        info!(
            tenant_id = %tenant_id,
            evaluated = report.evaluated,
            firing = report.firing,
            recorded = report.recorded,
            skipped = report.skipped,
            "Alert scan completed"
        );

        Ok(report)
    }

    /// Re-evaluates the keyed authorization and returns the alert if it still fires.
    async fn firing_alert(
        &self,
        ctx: &RequestContext,
        key: &AlertKey,
        authorization_id: AuthorizationId,
    ) -> Result<Option<Alert>, AppError> {
        let Some(authorization) = self
            .authorizations
            .get_by_id(ctx.tenant_id, authorization_id)
            .await?
        else {
            return Ok(None);
        };
        if !authorization.is_active() {
            return Ok(None);
        }

        Ok(self
            .engine
            .evaluate(std::slice::from_ref(&authorization), ctx.request_time)
            .alerts
            .into_iter()
            .find(|alert| &alert.id == key))
    }
}
