//! # authwatch-api
//!
//! HTTP API layer for AuthWatch built on Axum.
//!
//! Provides the alert and usage endpoints, the tenant-context extractor,
//! middleware (CORS, request logging), DTOs, error mapping, and the server
//! bootstrap that wires stores, services, and the scheduler together.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Stores, build_app, open_stores, run_server};
pub use error::ApiError;
pub use state::AppState;
