//! REST API client module for the league statistics service.
//!
//! This module provides the `ApiClient` for fetching current standings.
//! The endpoint is public; no authentication is involved.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_API_BASE_URL};
pub use error::ApiError;
