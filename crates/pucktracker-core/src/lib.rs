//! PuckTracker core - fetches league standings, caches them, and renders
//! them as HTML.
//!
//! The pieces, leaves first:
//! - [`models`]: raw API types and the normalized [`models::TeamStanding`]
//! - [`cache`]: the 24-hour standings snapshot on disk
//! - [`standings`]: sort order and the Overall/East/West/division sections
//! - [`render`]: HTML cards and the page wrapper
//! - [`api`]: the HTTP client
//! - [`loader`]: one load cycle (cache first, then fresh) and the daily reload

pub mod api;
pub mod cache;
pub mod config;
pub mod loader;
pub mod models;
pub mod render;
pub mod standings;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use cache::CacheManager;
pub use config::Config;
pub use loader::{LoadState, StandingsLoader, StandingsSource};
pub use models::TeamStanding;
pub use render::{HtmlFileTarget, RenderTarget};
