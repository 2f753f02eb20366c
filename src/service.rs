// src/service.rs
// Orchestration: cache lookup, season-bounded ingestion with fan-out
// fetches, report composition, and the profile view

use crate::cache::{CacheEntry, RecapCache};
use crate::compose::{compose, project_view};
use crate::config::RecapConfig;
use crate::error::Result;
use crate::model::{GameCategory, GameLog};
use crate::normalize::normalize_archives;
use crate::report::{Report, ReportView};
use crate::upstream::ArchiveFetcher;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Profile summary built from the upstream profile endpoints. Consumed by
/// presentation layers; the analytics sections never read it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub country: Option<String>,
    pub ratings: Vec<ProfileRating>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRating {
    pub format: GameCategory,
    pub rating: Option<u32>,
}

/// The report consumer surface: `report` and `report_view`, both
/// idempotent within the TTL window
pub struct RecapService {
    fetcher: Arc<dyn ArchiveFetcher>,
    cache: RecapCache,
    config: RecapConfig,
}

impl RecapService {
    pub fn new(fetcher: Arc<dyn ArchiveFetcher>, config: RecapConfig) -> Self {
        let cache = RecapCache::new(config.cache_ttl);
        Self {
            fetcher,
            cache,
            config,
        }
    }

    /// The subject's normalized, chronologically sorted season log, served
    /// from cache when fresh
    pub async fn game_log(&self, subject: &str) -> Result<Arc<GameLog>> {
        let slot = self.cache.slot(subject).await;
        let mut guard = slot.lock().await;
        if let Some(entry) = guard.as_ref() {
            if self.cache.is_fresh(entry) {
                debug!(subject, "game log cache hit");
                return Ok(entry.log.clone());
            }
        }
        let log = Arc::new(self.ingest(subject).await?);
        *guard = Some(CacheEntry {
            fetched_at: Instant::now(),
            log: log.clone(),
            report: None,
        });
        Ok(log)
    }

    /// The full report, computed at most once per TTL window. A fresh
    /// entry without a report gets the report stored back alongside its
    /// log under the same capture timestamp.
    pub async fn report(&self, subject: &str) -> Result<Arc<Report>> {
        let slot = self.cache.slot(subject).await;
        let mut guard = slot.lock().await;

        if let Some(entry) = guard.as_mut() {
            if self.cache.is_fresh(entry) {
                if let Some(report) = &entry.report {
                    debug!(subject, "report cache hit");
                    return Ok(report.clone());
                }
                let report = Arc::new(compose(subject, &entry.log));
                entry.report = Some(report.clone());
                return Ok(report);
            }
        }

        let log = Arc::new(self.ingest(subject).await?);
        let report = Arc::new(compose(subject, &log));
        *guard = Some(CacheEntry {
            fetched_at: Instant::now(),
            log,
            report: Some(report.clone()),
        });
        Ok(report)
    }

    /// Redacted projection of the cached report
    pub async fn report_view(&self, subject: &str) -> Result<ReportView> {
        let report = self.report(subject).await?;
        Ok(project_view(&report))
    }

    /// Profile summary with resolved country name and current ratings
    pub async fn profile(&self, subject: &str) -> Result<ProfileView> {
        let raw = self.fetcher.fetch_profile(subject).await?;

        let country = match &raw.country {
            Some(reference) => match self.fetcher.fetch_country(reference).await {
                Ok(c) => c.name,
                Err(e) => {
                    warn!(subject, error = %e, "country lookup failed");
                    None
                }
            },
            None => None,
        };

        Ok(ProfileView {
            username: raw.username.unwrap_or_else(|| subject.to_string()),
            display_name: raw.name,
            avatar: raw.avatar,
            country,
            ratings: vec![
                ProfileRating {
                    format: GameCategory::Rapid,
                    rating: raw.rapid_rating,
                },
                ProfileRating {
                    format: GameCategory::Blitz,
                    rating: raw.blitz_rating,
                },
                ProfileRating {
                    format: GameCategory::Bullet,
                    rating: raw.bullet_rating,
                },
            ],
        })
    }

    /// Discover, fetch, and normalize the subject's season archives.
    /// Archive fetches fan out concurrently; a failed archive is skipped
    /// without cancelling its siblings.
    async fn ingest(&self, subject: &str) -> Result<GameLog> {
        let all = self.fetcher.list_archives(subject).await?;
        let season = self.config.season;
        let identifiers: Vec<String> = all
            .into_iter()
            .filter(|id| archive_in_season(id, season))
            .collect();
        info!(subject, season, archives = identifiers.len(), "ingesting archives");

        let fetches = identifiers.iter().map(|id| self.fetcher.fetch_archive(id));
        let results = join_all(fetches).await;

        let mut batches = Vec::with_capacity(results.len());
        for (identifier, result) in identifiers.iter().zip(results) {
            match result {
                Ok(batch) => batches.push(batch),
                Err(e) => warn!(%identifier, error = %e, "archive fetch failed, skipping"),
            }
        }

        let log = normalize_archives(batches);
        info!(subject, games = log.len(), "game log ingested");
        Ok(log)
    }
}

/// Archive identifiers end in ".../{year}/{month}"; anything outside the
/// configured season year is skipped before fetching
fn archive_in_season(identifier: &str, season: i32) -> bool {
    let mut segments = identifier.trim_end_matches('/').rsplit('/');
    let _month = segments.next();
    segments.next() == Some(season.to_string().as_str())
}
