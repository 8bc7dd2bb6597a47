//! Load cycle for standings: cached render first, then a fresh fetch.
//!
//! A cycle moves `Loading → (CacheHit | CacheMiss) → Reconciled | Failed`.
//! A cached snapshot is rendered immediately and only replaced by fresh data,
//! never the other way round. The error card is shown only when neither the
//! cache nor the fetch produced anything.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::cache::{CacheManager, CACHE_TTL};
use crate::models::TeamStanding;
use crate::render::{error_html, loading_html, sections_html, RenderTarget, FETCH_FAILED_MESSAGE};
use crate::standings::build_sections;

/// Anything that can produce fresh standings.
pub trait StandingsSource {
    fn fetch_standings(&self) -> impl Future<Output = Result<Vec<TeamStanding>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    /// Cached standings are displayed; a failed fetch leaves the cycle here
    CacheHit,
    CacheMiss,
    /// Fresh standings are displayed and cached
    Reconciled,
    /// Nothing to show; the error card is displayed
    Failed,
}

pub struct StandingsLoader<S, T> {
    source: S,
    cache: CacheManager,
    target: T,
    state: LoadState,
    reload_interval: Duration,
}

impl<S: StandingsSource, T: RenderTarget> StandingsLoader<S, T> {
    pub fn new(source: S, cache: CacheManager, target: T) -> Self {
        Self {
            source,
            cache,
            target,
            state: LoadState::Loading,
            reload_interval: CACHE_TTL,
        }
    }

    /// Override the delay between full reloads (defaults to the cache TTL).
    pub fn with_reload_interval(mut self, interval: Duration) -> Self {
        self.reload_interval = interval;
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    fn render(&mut self, body: &str) {
        if let Err(e) = self.target.replace(body) {
            warn!(error = %e, "Failed to render standings");
        }
    }

    fn render_standings(&mut self, teams: &[TeamStanding]) {
        let html = sections_html(&build_sections(teams));
        self.render(&html);
    }

    async fn fetch_fresh(&self) -> Result<Vec<TeamStanding>> {
        let teams = self.source.fetch_standings().await?;
        if teams.is_empty() {
            return Err(ApiError::EmptyResponse.into());
        }
        Ok(teams)
    }

    /// Run one load cycle and return the state it ended in.
    pub async fn load(&mut self) -> LoadState {
        self.state = LoadState::Loading;
        self.render(&loading_html());

        match self.cache.load_standings() {
            Some(cached) => {
                debug!(teams = cached.len(), "Rendering cached standings");
                self.render_standings(&cached);
                self.state = LoadState::CacheHit;
            }
            None => self.state = LoadState::CacheMiss,
        }

        let fetched = self.fetch_fresh().await;
        match fetched {
            Ok(fresh) => {
                self.cache.save_standings(&fresh);
                self.render_standings(&fresh);
                self.state = LoadState::Reconciled;
                info!(teams = fresh.len(), "Standings updated");
            }
            Err(e) if self.state == LoadState::CacheHit => {
                warn!(error = %e, "Fetch failed, keeping cached standings");
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed with no cached standings");
                self.render(&error_html(FETCH_FAILED_MESSAGE));
                self.state = LoadState::Failed;
            }
        }

        self.state
    }

    /// Load now, then reload from scratch every interval. Never returns.
    pub async fn run(&mut self) {
        loop {
            let state = self.load().await;
            debug!(?state, next_reload_secs = self.reload_interval.as_secs(), "Load cycle finished");
            tokio::time::sleep(self.reload_interval).await;
        }
    }
}
