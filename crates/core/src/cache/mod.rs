//! In-memory result cache keyed by requested URL.
//!
//! A concurrent map guarded by a tokio `RwLock`, with per-entry TTL
//! measured from insertion. Reads never extend an entry's lifetime.
//! Expired entries are dropped lazily on access and by the periodic
//! sweeper; either way an expired document is never returned.
//!
//! Hit/miss counters are cumulative for the process lifetime and
//! survive `flush_all`, so they track cache effectiveness rather than
//! current occupancy.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::document::ExtractedDocument;

/// Default entry lifetime (10 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Default interval between background expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(120);

/// Cached document with its insertion timestamp.
struct CacheEntry {
    document: ExtractedDocument,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Cache usage counters plus current occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    /// Number of live (non-expired) entries.
    pub keys: usize,
    /// Cumulative lookups answered from cache.
    pub hits: u64,
    /// Cumulative lookups that found nothing usable.
    pub misses: u64,
}

/// Shared in-memory cache for extracted documents.
///
/// Constructed explicitly and shared via `Arc` so tests can run
/// independent instances with their own TTLs.
pub struct DocumentCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    ttl: Duration,
}

impl DocumentCache {
    /// Create a cache with the default 600s TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), hits: AtomicU64::new(0), misses: AtomicU64::new(0), ttl }
    }

    /// Look up a document. Expired and absent entries are
    /// indistinguishable to the caller; both count as a miss.
    pub async fn get(&self, url: &str) -> Option<ExtractedDocument> {
        {
            let entries = self.entries.read().await;
            match entries.get(url) {
                Some(entry) if !entry.is_expired(self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.document.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Lazy expiry: re-check under the write lock before removing,
        // a concurrent put may have refreshed the entry.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(url)
            && entry.is_expired(self.ttl)
        {
            entries.remove(url);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert or replace the document for a URL, resetting its TTL clock.
    pub async fn put(&self, url: &str, document: ExtractedDocument) {
        let mut entries = self.entries.write().await;
        entries.insert(url.to_string(), CacheEntry { document, stored_at: Instant::now() });
    }

    /// Drop every entry immediately. Counters are preserved.
    pub async fn flush_all(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Current occupancy and cumulative hit/miss counters.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let keys = entries.values().filter(|e| !e.is_expired(self.ttl)).count();
        CacheStats {
            keys,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Remove expired entries, returning how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }

    /// Spawn the periodic expiry sweep on the current runtime.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // first tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let swept = cache.sweep_expired().await;
                if swept > 0 {
                    tracing::debug!(swept, "expired cache entries removed");
                }
            }
        })
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}
