//! Shared types, errors, and configuration for Tesorero.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Loosely-typed record IDs as returned by the back-office API
//! - List filters for the list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
