//! Custom Axum extractors.

pub mod tenant;

pub use tenant::{TENANT_HEADER, TenantContext, USER_HEADER};
