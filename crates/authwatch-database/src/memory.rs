//! In-memory store implementations for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use authwatch_core::result::AppResult;
use authwatch_core::types::{AlertRecordId, AuthorizationId, TenantId, UserId};
use authwatch_entity::alert::{AcknowledgedAlertRecord, AlertType};
use authwatch_entity::authorization::Authorization;

use crate::store::{AlertRecordStore, AuthorizationStore};

/// Authorizations held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryAuthorizationStore {
    authorizations: DashMap<AuthorizationId, Authorization>,
}

impl MemoryAuthorizationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an authorization.
    pub fn put(&self, authorization: Authorization) {
        self.authorizations.insert(authorization.id, authorization);
    }

    /// Number of stored authorizations.
    pub fn len(&self) -> usize {
        self.authorizations.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.authorizations.is_empty()
    }
}

#[async_trait]
impl AuthorizationStore for MemoryAuthorizationStore {
    async fn list_active(&self, tenant_id: TenantId) -> AppResult<Vec<Authorization>> {
        let mut active: Vec<Authorization> = self
            .authorizations
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.is_active())
            .map(|r| r.value().clone())
            .collect();
        // Same order as the SQL query: end date ascending, open-ended last.
        active.sort_by(|a, b| match (a.end_date, b.end_date) {
            (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(active)
    }

    async fn get_by_id(
        &self,
        tenant_id: TenantId,
        id: AuthorizationId,
    ) -> AppResult<Option<Authorization>> {
        Ok(self
            .authorizations
            .get(&id)
            .filter(|r| r.tenant_id == tenant_id)
            .map(|r| r.value().clone()))
    }

    async fn list_tenants_with_active(&self) -> AppResult<Vec<TenantId>> {
        let mut tenants: Vec<TenantId> = self
            .authorizations
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.tenant_id)
            .collect();
        tenants.sort();
        tenants.dedup();
        Ok(tenants)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Alert records held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryAlertRecordStore {
    records: DashMap<AlertRecordId, AcknowledgedAlertRecord>,
    /// One entry per (tenant, authorization, type) being upserted.
    upsert_locks: DashMap<(TenantId, AuthorizationId, AlertType), ()>,
}

impl MemoryAlertRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn latest_for(
        &self,
        tenant_id: TenantId,
        authorization_id: AuthorizationId,
        alert_type: AlertType,
    ) -> Option<AlertRecordId> {
        self.records
            .iter()
            .filter(|r| {
                r.tenant_id == tenant_id
                    && r.authorization_id == authorization_id
                    && r.alert_type == alert_type
            })
            .max_by_key(|r| r.created_at)
            .map(|r| r.id)
    }
}

#[async_trait]
impl AlertRecordStore for MemoryAlertRecordStore {
    async fn insert(&self, record: AcknowledgedAlertRecord) -> AppResult<AcknowledgedAlertRecord> {
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn upsert_acknowledgement(
        &self,
        record: AcknowledgedAlertRecord,
    ) -> AppResult<AcknowledgedAlertRecord> {
        let key = (record.tenant_id, record.authorization_id, record.alert_type);
        // The entry guard serializes upserts for the same key until this call returns.
        let _guard = self.upsert_locks.entry(key).or_default();

        let existing_id = self.latest_for(key.0, key.1, key.2);

        if let Some(mut existing) = existing_id.and_then(|id| self.records.get_mut(&id)) {
            existing.severity = record.severity;
            existing.message = record.message;
            existing.is_read = record.is_read;
            existing.read_at = record.read_at;
            existing.action_taken = record.action_taken;
            existing.action_taken_at = record.action_taken_at;
            existing.action_taken_by_id = record.action_taken_by_id;
            return Ok(existing.clone());
        }

        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
    ) -> AppResult<Option<AcknowledgedAlertRecord>> {
        Ok(self
            .records
            .get(&id)
            .filter(|r| r.tenant_id == tenant_id)
            .map(|r| r.value().clone()))
    }

    async fn has_unread(
        &self,
        tenant_id: TenantId,
        authorization_id: AuthorizationId,
        alert_type: AlertType,
    ) -> AppResult<bool> {
        Ok(self.records.iter().any(|r| {
            r.tenant_id == tenant_id
                && r.authorization_id == authorization_id
                && r.alert_type == alert_type
                && !r.is_read
        }))
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        acknowledged: bool,
        limit: u32,
    ) -> AppResult<Vec<AcknowledgedAlertRecord>> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.is_read == acknowledged)
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }

    async fn mark_acknowledged(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AcknowledgedAlertRecord>> {
        Ok(self
            .records
            .get_mut(&id)
            .filter(|r| r.tenant_id == tenant_id)
            .map(|mut r| {
                r.acknowledge(user_id, now);
                r.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authwatch_core::types::ClientId;
    use authwatch_entity::alert::{AlertSeverity, ACTION_ACKNOWLEDGED};
    use authwatch_entity::authorization::AuthorizationStatus;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn authorization(
        tenant_id: TenantId,
        status: AuthorizationStatus,
        end_date: Option<NaiveDate>,
    ) -> Authorization {
        Authorization {
            id: AuthorizationId::new(),
            tenant_id,
            client_id: ClientId::new(),
            client_name: "Grace Hopper".to_string(),
            client_identifier: None,
            authorization_number: Some("AUTH-7".to_string()),
            service_type: None,
            authorized_units: Some(10.0),
            used_units: Some(2.0),
            start_date: None,
            end_date,
            status,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn record(
        tenant_id: TenantId,
        authorization_id: AuthorizationId,
        created_at: DateTime<Utc>,
    ) -> AcknowledgedAlertRecord {
        AcknowledgedAlertRecord {
            id: AlertRecordId::new(),
            tenant_id,
            authorization_id,
            alert_type: AlertType::UnitsLow,
            severity: AlertSeverity::Warning,
            message: "20.0% of units remaining".to_string(),
            is_read: false,
            read_at: None,
            action_taken: None,
            action_taken_at: None,
            action_taken_by_id: None,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_list_active_filters_status_and_tenant() {
        let store = MemoryAuthorizationStore::new();
        let tenant = TenantId::new();
        let late = authorization(tenant, AuthorizationStatus::Active, NaiveDate::from_ymd_opt(2026, 6, 1));
        let early = authorization(tenant, AuthorizationStatus::Active, NaiveDate::from_ymd_opt(2026, 4, 1));
        let open = authorization(tenant, AuthorizationStatus::Active, None);
        store.put(open.clone());
        store.put(late.clone());
        store.put(early.clone());
        store.put(authorization(tenant, AuthorizationStatus::Expired, None));
        store.put(authorization(TenantId::new(), AuthorizationStatus::Active, None));

        let ids: Vec<_> = store
            .list_active(tenant)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id, open.id]);
    }

    #[tokio::test]
    async fn test_get_by_id_is_tenant_scoped() {
        let store = MemoryAuthorizationStore::new();
        let tenant = TenantId::new();
        let auth = authorization(tenant, AuthorizationStatus::Pending, None);
        store.put(auth.clone());

        assert!(store.get_by_id(tenant, auth.id).await.unwrap().is_some());
        assert!(store.get_by_id(TenantId::new(), auth.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_tenants_with_active_deduplicates() {
        let store = MemoryAuthorizationStore::new();
        let tenant = TenantId::new();
        store.put(authorization(tenant, AuthorizationStatus::Active, None));
        store.put(authorization(tenant, AuthorizationStatus::Active, None));
        store.put(authorization(TenantId::new(), AuthorizationStatus::Terminated, None));

        assert_eq!(store.list_tenants_with_active().await.unwrap(), vec![tenant]);
    }

    #[tokio::test]
    async fn test_upsert_updates_latest_record() {
        let store = MemoryAlertRecordStore::new();
        let tenant = TenantId::new();
        let auth_id = AuthorizationId::new();
        let first = store.insert(record(tenant, auth_id, now())).await.unwrap();

        let mut incoming = record(tenant, auth_id, now() + Duration::hours(1));
        incoming.acknowledge(UserId::new(), now() + Duration::hours(1));
        let saved = store.upsert_acknowledgement(incoming).await.unwrap();

        assert_eq!(saved.id, first.id);
        assert!(saved.is_read);
        assert_eq!(saved.action_taken.as_deref(), Some(ACTION_ACKNOWLEDGED));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_inserts_when_absent() {
        let store = MemoryAlertRecordStore::new();
        let tenant = TenantId::new();
        let mut incoming = record(tenant, AuthorizationId::new(), now());
        incoming.acknowledge(UserId::new(), now());

        let saved = store.upsert_acknowledgement(incoming.clone()).await.unwrap();
        assert_eq!(saved.id, incoming.id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_keep_one_record() {
        let store = std::sync::Arc::new(MemoryAlertRecordStore::new());
        let tenant = TenantId::new();
        let auth_id = AuthorizationId::new();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    let mut incoming = record(tenant, auth_id, now());
                    incoming.acknowledge(UserId::new(), now());
                    store.upsert_acknowledgement(incoming).await.unwrap().id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();

        assert_eq!(store.len(), 1);
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_is_tenant_scoped() {
        let store = MemoryAlertRecordStore::new();
        let tenant = TenantId::new();
        let saved = store
            .insert(record(tenant, AuthorizationId::new(), now()))
            .await
            .unwrap();

        assert!(store.find_by_id(tenant, saved.id).await.unwrap().is_some());
        assert!(store.find_by_id(TenantId::new(), saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_read_state_newest_first() {
        let store = MemoryAlertRecordStore::new();
        let tenant = TenantId::new();
        let auth_id = AuthorizationId::new();
        let older = store.insert(record(tenant, auth_id, now())).await.unwrap();
        let newer = store
            .insert(record(tenant, auth_id, now() + Duration::minutes(5)))
            .await
            .unwrap();
        let mut read = record(tenant, auth_id, now());
        read.acknowledge(UserId::new(), now());
        store.insert(read).await.unwrap();

        let unread = store.list(tenant, false, 10).await.unwrap();
        assert_eq!(
            unread.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
        assert_eq!(store.list(tenant, false, 1).await.unwrap().len(), 1);
        assert_eq!(store.list(tenant, true, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_acknowledged_sets_action_fields() {
        let store = MemoryAlertRecordStore::new();
        let tenant = TenantId::new();
        let auth_id = AuthorizationId::new();
        let saved = store.insert(record(tenant, auth_id, now())).await.unwrap();
        assert!(store.has_unread(tenant, auth_id, AlertType::UnitsLow).await.unwrap());

        let user = UserId::new();
        let acked = store
            .mark_acknowledged(tenant, saved.id, user, now())
            .await
            .unwrap()
            .unwrap();
        assert!(acked.is_read);
        assert_eq!(acked.action_taken_by_id, Some(user));
        assert_eq!(acked.read_at, Some(now()));
        assert!(!store.has_unread(tenant, auth_id, AlertType::UnitsLow).await.unwrap());

        let other_tenant = store
            .mark_acknowledged(TenantId::new(), saved.id, user, now())
            .await
            .unwrap();
        assert!(other_tenant.is_none());
    }
}
