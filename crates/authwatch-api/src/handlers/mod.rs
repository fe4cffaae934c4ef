//! HTTP handlers.

pub mod alerts;
pub mod authorization;
pub mod health;
