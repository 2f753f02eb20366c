// src/cache.rs
// TTL-bounded, per-subject store of the normalized game log and the
// report computed from it

use crate::model::GameLog;
use crate::report::Report;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// One cached capture for a subject. The log and report share the capture
/// timestamp: storing the report back into the entry avoids recomputation
/// on repeated queries within the TTL window.
pub struct CacheEntry {
    pub fetched_at: Instant,
    pub log: Arc<GameLog>,
    pub report: Option<Arc<Report>>,
}

/// A per-subject slot. Callers hold the slot lock across
/// "check expiry -> fetch/compute -> store", so concurrent requests for
/// the same subject coalesce instead of stampeding upstream.
pub type SubjectSlot = Arc<Mutex<Option<CacheEntry>>>;

/// Keyed by lowercased subject name
pub struct RecapCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, SubjectSlot>>,
}

impl RecapCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Slot for a subject, creating it on first use. The outer map lock is
    /// held only for the lookup, never across a fetch.
    ///
    /// Each lookup also drops other subjects' slots whose entries have
    /// expired, so the map does not grow one slot per subject forever. A
    /// slot still held by an in-flight caller is never dropped.
    pub async fn slot(&self, subject: &str) -> SubjectSlot {
        let key = subject.to_lowercase();
        let mut slots = self.slots.lock().await;
        slots.retain(|k, slot| {
            if *k == key || Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(guard) => guard.as_ref().is_some_and(|e| self.is_fresh(e)),
                Err(_) => true,
            }
        });
        slots.entry(key).or_default().clone()
    }

    /// An entry older than the TTL is treated as absent
    pub fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.fetched_at.elapsed() <= self.ttl
    }
}
