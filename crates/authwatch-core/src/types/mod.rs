//! Core type definitions used across the AuthWatch workspace.

pub mod id;

pub use id::*;
