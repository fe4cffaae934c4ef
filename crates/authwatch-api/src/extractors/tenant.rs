//! `TenantContext` extractor: reads the tenant and acting user forwarded by
//! the upstream gateway and builds a [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authwatch_core::error::AppError;
use authwatch_core::types::{TenantId, UserId};
use authwatch_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the caller's tenant UUID. Required.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Header carrying the acting user's UUID. Required only to acknowledge.
pub const USER_HEADER: &str = "x-user-id";

/// Request context for the calling tenant.
#[derive(Debug, Clone)]
pub struct TenantContext(pub RequestContext);

impl std::ops::Deref for TenantContext {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = header_uuid(parts, TENANT_HEADER)?
            .map(TenantId::from_uuid)
            .ok_or_else(|| AppError::authentication(format!("Missing {TENANT_HEADER} header")))?;
        let user_id = header_uuid(parts, USER_HEADER)?.map(UserId::from_uuid);

        Ok(TenantContext(RequestContext::new(tenant_id, user_id)))
    }
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Option<uuid::Uuid>, AppError> {
    let Some(value) = parts.headers.get(name) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|v| uuid::Uuid::parse_str(v.trim()).ok())
        .map(Some)
        .ok_or_else(|| AppError::authentication(format!("Invalid {name} header")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use authwatch_core::error::ErrorKind;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<TenantContext, ApiError> {
        let (mut parts, _) = request.into_parts();
        TenantContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_tenant_and_user() {
        let tenant = uuid::Uuid::new_v4();
        let user = uuid::Uuid::new_v4();
        let request = Request::builder()
            .header(TENANT_HEADER, tenant.to_string())
            .header(USER_HEADER, user.to_string())
            .body(())
            .unwrap();

        let ctx = extract(request).await.unwrap();
        assert_eq!(ctx.tenant_id, TenantId::from_uuid(tenant));
        assert_eq!(ctx.user_id, Some(UserId::from_uuid(user)));
    }

    #[tokio::test]
    async fn test_missing_tenant_is_rejected() {
        let request = Request::builder().body(()).unwrap();
        let err = extract(request).await.unwrap_err();
        assert_eq!(err.0.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_malformed_user_is_rejected() {
        let request = Request::builder()
            .header(TENANT_HEADER, uuid::Uuid::new_v4().to_string())
            .header(USER_HEADER, "nurse-42")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_err());
    }
}
