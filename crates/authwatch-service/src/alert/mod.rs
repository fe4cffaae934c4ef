//! Authorization alerting: classification, aggregation, and the store-backed service.

pub mod engine;
pub mod service;
pub mod summary;
pub mod usage;

pub use engine::{AlertEngine, ComputationSkipped, Evaluation, SkippedBranch};
pub use service::{AlertFeed, AlertQuery, AlertService, ScanReport};
pub use summary::AlertSummary;
pub use usage::AuthorizationUsage;
