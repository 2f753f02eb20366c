// src/upstream/mod.rs
// Upstream fetch adapter: the seam between the analytics core and the
// public games API

pub mod client;
pub mod types;

pub use client::ChessComClient;
pub use types::{RawArchive, RawCountry, RawGame, RawProfile, RawSide};

use crate::error::Result;
use async_trait::async_trait;

/// Contract for retrieving raw archives and profile data for a subject.
/// The analytics core only consumes this; tests substitute their own
/// implementation.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Archive identifiers (URLs) for the subject, oldest first.
    /// Fails with [`crate::RecapError::SubjectNotFound`] when the subject
    /// does not exist upstream.
    async fn list_archives(&self, subject: &str) -> Result<Vec<String>>;

    /// One raw record batch. Callers treat a failure here as skippable.
    async fn fetch_archive(&self, identifier: &str) -> Result<RawArchive>;

    /// Raw profile fields, including per-category current ratings
    async fn fetch_profile(&self, subject: &str) -> Result<RawProfile>;

    /// Resolve a country reference to its display name
    async fn fetch_country(&self, reference: &str) -> Result<RawCountry>;
}
