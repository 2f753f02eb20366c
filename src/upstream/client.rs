// src/upstream/client.rs
// HTTP client for the public games API, with bounded retry on transient
// failures

use super::types::{ApiArchiveList, ApiStats, RawArchive, RawCountry, RawProfile};
use super::ArchiveFetcher;
use crate::config::RecapConfig;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Maximum attempts per request before giving up
const MAX_ATTEMPTS: u32 = 3;
/// Base backoff between retries (doubles each attempt)
const BASE_BACKOFF: Duration = Duration::from_millis(500);
/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the chess.com public API
pub struct ChessComClient {
    http: Client,
    base: String,
}

impl ChessComClient {
    pub fn new(config: &RecapConfig) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base: config.upstream_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// GET a JSON document with retry on transient failures. A 404 is
    /// returned immediately as `UpstreamStatus { status: 404 }` so callers
    /// can map it to their own not-found semantics.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempts = 0;
        let mut backoff = BASE_BACKOFF;

        loop {
            attempts += 1;
            let outcome = match self.http.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json::<T>().await?);
                    }
                    let err = RecapError::UpstreamStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    };
                    // Client errors (404 and friends) will not improve on retry
                    if status.is_client_error() {
                        return Err(err);
                    }
                    Err(err)
                }
                Err(e) => Err(RecapError::Upstream(e)),
            };

            match outcome {
                Err(e) if attempts < MAX_ATTEMPTS => {
                    warn!(url, attempt = attempts, error = %e, "upstream request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                other => return other,
            }
        }
    }

    fn is_not_found(err: &RecapError) -> bool {
        matches!(err, RecapError::UpstreamStatus { status: 404, .. })
    }
}

#[async_trait]
impl ArchiveFetcher for ChessComClient {
    async fn list_archives(&self, subject: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&format!("player/{subject}/games/archives"));
        match self.get_json::<ApiArchiveList>(&url).await {
            Ok(list) => Ok(list.archives),
            Err(e) if Self::is_not_found(&e) => {
                Err(RecapError::SubjectNotFound(subject.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_archive(&self, identifier: &str) -> Result<RawArchive> {
        // Archive identifiers are full URLs from list_archives
        self.get_json(identifier).await
    }

    async fn fetch_profile(&self, subject: &str) -> Result<RawProfile> {
        let profile_url = self.endpoint(&format!("player/{subject}"));
        let mut profile = match self.get_json::<RawProfile>(&profile_url).await {
            Ok(p) => p,
            Err(e) if Self::is_not_found(&e) => {
                return Err(RecapError::SubjectNotFound(subject.to_string()));
            }
            Err(e) => return Err(e),
        };

        // Current ratings live on the stats endpoint; missing stats are not
        // an error, the profile simply carries no ratings
        let stats_url = self.endpoint(&format!("player/{subject}/stats"));
        match self.get_json::<ApiStats>(&stats_url).await {
            Ok(stats) => {
                profile.rapid_rating = ApiStats::rating_of(&stats.chess_rapid);
                profile.blitz_rating = ApiStats::rating_of(&stats.chess_blitz);
                profile.bullet_rating = ApiStats::rating_of(&stats.chess_bullet);
            }
            Err(e) => warn!(subject, error = %e, "stats fetch failed, profile ratings omitted"),
        }

        Ok(profile)
    }

    async fn fetch_country(&self, reference: &str) -> Result<RawCountry> {
        // Country references are full URLs on the profile
        self.get_json(reference).await
    }
}
