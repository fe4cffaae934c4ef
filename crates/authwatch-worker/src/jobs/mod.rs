//! Scheduled job implementations.

pub mod alert_scan;

pub use alert_scan::{AlertScanJob, AlertScanSummary};
