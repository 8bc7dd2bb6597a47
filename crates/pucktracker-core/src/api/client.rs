//! API client for the league statistics REST API.
//!
//! One endpoint is used: `GET {base}/standings`. The response is parsed into
//! the raw `StandingsResponse` shape and normalized before being returned.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use tracing::debug;

use crate::loader::StandingsSource;
use crate::models::{to_team_standings, StandingsResponse, TeamStanding};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the public statistics API
pub const DEFAULT_API_BASE_URL: &str = "https://statsapi.web.nhl.com/api/v1";

const USER_AGENT: &str = concat!("pucktracker/", env!("CARGO_PKG_VERSION"));

/// API client for standings.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against `base_url` (no trailing `/standings`).
    /// Transport defaults are kept; no request timeout is configured.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn standings_url(&self) -> String {
        format!("{}/standings", self.base_url)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch current standings, bypassing any intermediate HTTP cache.
    pub async fn fetch_standings(&self) -> Result<Vec<TeamStanding>> {
        let url = self.standings_url();
        debug!(url = %url, "Fetching standings");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let text = response
            .text()
            .await
            .map_err(ApiError::from)
            .context("Failed to read standings response body")?;
        let parsed: StandingsResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .context("Failed to parse standings response")?;

        let teams = to_team_standings(&parsed);
        debug!(teams = teams.len(), "Parsed standings");
        Ok(teams)
    }
}

impl StandingsSource for ApiClient {
    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>> {
        ApiClient::fetch_standings(self).await
    }
}
