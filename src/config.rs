// src/config.rs
// Environment-based configuration - single source of truth for all env vars

use chrono::{Datelike, Utc};
use std::time::Duration;
use tracing::info;

/// Default cache TTL in seconds (5 minutes)
const DEFAULT_TTL_SECS: u64 = 300;
/// Default upstream API base URL
const DEFAULT_UPSTREAM_URL: &str = "https://api.chess.com/pub";
/// Default User-Agent sent upstream (the public API asks clients to identify)
const DEFAULT_USER_AGENT: &str = "recap/0.3";

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RecapConfig {
    /// Analysis season: the calendar year ingestion is restricted to (RECAP_SEASON)
    pub season: i32,
    /// Cache entry time-to-live (RECAP_CACHE_TTL_SECS)
    pub cache_ttl: Duration,
    /// Upstream API base URL (RECAP_UPSTREAM_URL)
    pub upstream_url: String,
    /// User-Agent header for upstream requests (RECAP_USER_AGENT)
    pub user_agent: String,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            season: Utc::now().year(),
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RecapConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let season = read_var("RECAP_SEASON")
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(defaults.season);

        let cache_ttl = read_var("RECAP_CACHE_TTL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let upstream_url = read_var("RECAP_UPSTREAM_URL").unwrap_or(defaults.upstream_url);
        let user_agent = read_var("RECAP_USER_AGENT").unwrap_or(defaults.user_agent);

        let config = Self {
            season,
            cache_ttl,
            upstream_url,
            user_agent,
        };
        info!(
            season = config.season,
            ttl_secs = config.cache_ttl.as_secs(),
            upstream = %config.upstream_url,
            "configuration loaded"
        );
        config
    }
}

/// Read a single env var, filtering empty values
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecapConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.upstream_url, "https://api.chess.com/pub");
        assert!(config.season >= 2024);
    }
}
