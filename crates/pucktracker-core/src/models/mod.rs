//! Data models for league standings.
//!
//! - `StandingsResponse` and friends: the raw API response shape
//! - `TeamStanding`: the normalized per-team record every other module consumes

pub mod standings;

pub use standings::{to_team_standings, StandingsResponse, TeamStanding, UNKNOWN};
