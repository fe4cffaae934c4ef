//! # authwatch-service
//!
//! Business logic for AuthWatch: the pure alert engine that classifies
//! authorizations into expiry and usage alerts, and the [`AlertService`]
//! that wires it to the authorization and alert-record stores.
//!
//! Services take their collaborators at construction time as `Arc<dyn ...>`
//! store handles.

pub mod alert;
pub mod context;

pub use alert::{
    AlertEngine, AlertFeed, AlertQuery, AlertService, AlertSummary, AuthorizationUsage,
    ComputationSkipped, Evaluation, ScanReport, SkippedBranch,
};
pub use context::RequestContext;
