use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::TeamStanding;

/// Key the standings snapshot is stored under.
pub const STANDINGS_CACHE_KEY: &str = "pucktracker_standings_v3";

/// A snapshot expires 24 hours after it was written.
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Reload interval matching the cache lifetime.
pub const CACHE_TTL: std::time::Duration = std::time::Duration::from_millis(CACHE_TTL_MS as u64);

/// On-disk snapshot: `{ "timestamp": <epoch ms>, "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self::at(data, Utc::now())
    }

    pub fn at(data: T, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, data }
    }

    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_milliseconds()
    }

    /// Expired once strictly more than the TTL has passed. Timestamps in the
    /// future never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.age_ms(now) > CACHE_TTL_MS
    }

    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        let minutes = self.age_ms(now) / 60_000;
        if minutes < 1 {
            // Covers clock skew too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// File-backed store for the standings snapshot. Reads and writes are
/// best-effort: nothing here fails outward.
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T, now: DateTime<Utc>) -> Result<()> {
        std::fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("Failed to create cache dir: {}", self.cache_dir.display()))?;
        let cached = CachedData::at(data, now);
        let contents = serde_json::to_string(&cached)?;
        std::fs::write(self.cache_path(name), contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }

    // ===== Standings =====

    pub fn load_standings(&self) -> Option<Vec<TeamStanding>> {
        self.load_standings_at(Utc::now())
    }

    /// Load the snapshot if it exists, parses, and has not expired at `now`.
    pub fn load_standings_at(&self, now: DateTime<Utc>) -> Option<Vec<TeamStanding>> {
        match self.load::<Vec<TeamStanding>>(STANDINGS_CACHE_KEY) {
            Ok(Some(cached)) if cached.is_expired_at(now) => {
                debug!(cache = STANDINGS_CACHE_KEY, age_ms = cached.age_ms(now), "Cache expired");
                None
            }
            Ok(Some(cached)) => {
                debug!(
                    cache = STANDINGS_CACHE_KEY,
                    teams = cached.data.len(),
                    age = %cached.age_display(now),
                    "Loaded standings from cache"
                );
                Some(cached.data)
            }
            Ok(None) => None,
            Err(e) => {
                debug!(cache = STANDINGS_CACHE_KEY, error = %e, "Ignoring unreadable cache");
                None
            }
        }
    }

    pub fn save_standings(&self, standings: &[TeamStanding]) {
        self.save_standings_at(standings, Utc::now())
    }

    /// Overwrite the snapshot. Failure to persist is logged and ignored.
    pub fn save_standings_at(&self, standings: &[TeamStanding], now: DateTime<Utc>) {
        if let Err(e) = self.save(STANDINGS_CACHE_KEY, &standings, now) {
            warn!(cache = STANDINGS_CACHE_KEY, error = %e, "Failed to cache standings");
        }
    }

    /// Age of the stored snapshot regardless of expiry, for status lines.
    pub fn snapshot_age_display(&self) -> Option<String> {
        match self.load::<serde_json::Value>(STANDINGS_CACHE_KEY) {
            Ok(Some(cached)) => Some(cached.age_display(Utc::now())),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = STANDINGS_CACHE_KEY, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    /// Fresh, empty scratch directory for one test.
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("pucktracker-test-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    pub(crate) fn sample_teams() -> Vec<TeamStanding> {
        vec![
            TeamStanding::new("Boston Bruins", 12, 8, 5, "Eastern", "Atlantic"),
            TeamStanding::new("Vegas Golden Knights", 14, 9, 6, "Western", "Pacific"),
        ]
    }

    #[test]
    fn test_round_trip_within_ttl() {
        let cache = CacheManager::new(scratch_dir("round_trip"));
        let teams = sample_teams();

        cache.save_standings(&teams);
        assert_eq!(cache.load_standings(), Some(teams));
    }

    #[test]
    fn test_missing_entry_is_absent() {
        let cache = CacheManager::new(scratch_dir("missing"));
        assert_eq!(cache.load_standings(), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let cache = CacheManager::new(scratch_dir("expiry"));
        let now = Utc::now();

        cache.save_standings_at(&sample_teams(), now - Duration::milliseconds(CACHE_TTL_MS + 1));
        assert_eq!(cache.load_standings_at(now), None);

        cache.save_standings_at(&sample_teams(), now - Duration::milliseconds(CACHE_TTL_MS));
        assert!(cache.load_standings_at(now).is_some());
    }

    #[test]
    fn test_future_timestamp_is_not_expired() {
        let cache = CacheManager::new(scratch_dir("future"));
        let now = Utc::now();
        cache.save_standings_at(&sample_teams(), now + Duration::minutes(5));
        assert!(cache.load_standings_at(now).is_some());
    }

    #[test]
    fn test_malformed_entries_are_misses() {
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let cache = CacheManager::new(dir.clone());
        let path = dir.join(format!("{}.json", STANDINGS_CACHE_KEY));

        for contents in [
            "not json",
            "null",
            r#"{"data": []}"#,
            r#"{"timestamp": 1700000000000}"#,
            r#"{"timestamp": 1700000000000, "data": "teams"}"#,
        ] {
            std::fs::write(&path, contents).unwrap();
            assert_eq!(cache.load_standings(), None, "contents: {}", contents);
        }
    }

    #[test]
    fn test_snapshot_format() {
        let dir = scratch_dir("format");
        let cache = CacheManager::new(dir.clone());
        let now = Utc::now();
        cache.save_standings_at(&sample_teams(), now);

        let raw = std::fs::read_to_string(dir.join("pucktracker_standings_v3.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["timestamp"].as_i64(), Some(now.timestamp_millis()));
        assert_eq!(json["data"][0]["teamName"], "Boston Bruins");
        assert_eq!(json["data"][1]["conferenceShort"], "West");
    }

    #[test]
    fn test_save_failure_is_ignored() {
        let dir = scratch_dir("save_failure");
        // A regular file where the cache directory should be
        std::fs::write(&dir, "blocker").unwrap();
        let cache = CacheManager::new(dir.clone());

        cache.save_standings(&sample_teams());
        assert_eq!(cache.load_standings(), None);
        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn test_age_display() {
        let now = Utc::now();
        let cached = |age: Duration| CachedData::at((), now - age);
        assert_eq!(cached(Duration::seconds(10)).age_display(now), "just now");
        assert_eq!(cached(Duration::minutes(-3)).age_display(now), "just now");
        assert_eq!(cached(Duration::minutes(5)).age_display(now), "5m ago");
        assert_eq!(cached(Duration::hours(3)).age_display(now), "3h ago");
        assert_eq!(cached(Duration::hours(50)).age_display(now), "2d ago");
    }

    #[test]
    fn test_snapshot_age_display() {
        let cache = CacheManager::new(scratch_dir("age_display"));
        assert_eq!(cache.snapshot_age_display(), None);
        cache.save_standings(&sample_teams());
        assert_eq!(cache.snapshot_age_display().as_deref(), Some("just now"));
    }
}
