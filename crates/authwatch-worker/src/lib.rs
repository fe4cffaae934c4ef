//! Scheduled background work for AuthWatch.
//!
//! This crate provides:
//! - A cron scheduler that owns the periodic tasks
//! - The alert scan job that records firing alerts for every tenant

pub mod jobs;
pub mod scheduler;

pub use jobs::{AlertScanJob, AlertScanSummary};
pub use scheduler::CronScheduler;
