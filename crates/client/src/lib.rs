//! REST client for the back-office API.
//!
//! This crate provides:
//! - The [`BackofficeApi`] trait the screens depend on
//! - A `reqwest` implementation, [`HttpBackofficeApi`]
//! - Wire models for reference data and documents
//! - Backend error unwrapping

pub mod api;
pub mod error;
pub mod http;
pub mod models;

pub use api::BackofficeApi;
pub use error::{ApiError, ApiResult, detail_message};
pub use http::HttpBackofficeApi;
