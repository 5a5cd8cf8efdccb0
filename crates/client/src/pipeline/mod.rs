//! The scrape pipeline: validate, cache lookup, fetch, extract, store.
//!
//! Validation failure terminates before any cache or network access.
//! A cache hit short-circuits fetch and extract entirely. Fetch
//! failures surface their classification and cache nothing. The cache
//! is keyed by the originally requested URL string, never a redirect
//! target, so repeat requests for the same input always hit.
//!
//! Concurrent identical requests are not deduplicated: two misses for
//! the same URL may both fetch and both store, last write wins.

use std::sync::Arc;

use sift_core::{AppConfig, DocumentCache, Error, ExtractedDocument};

use crate::extract;
use crate::fetch::{self, FetchClient, FetchConfig};

/// A scraped document plus where it came from.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// The extracted document.
    pub document: ExtractedDocument,
    /// True when served from cache without a fresh fetch.
    pub from_cache: bool,
}

/// Composes the validator, cache, fetcher, and extractor.
pub struct Scraper {
    fetcher: FetchClient,
    cache: Arc<DocumentCache>,
}

impl Scraper {
    /// Build a scraper over a shared cache, with fetch bounds from config.
    pub fn new(config: &AppConfig, cache: Arc<DocumentCache>) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        })?;

        Ok(Self { fetcher, cache })
    }

    /// The cache this scraper reads and populates.
    pub fn cache(&self) -> &Arc<DocumentCache> {
        &self.cache
    }

    /// Run the full pipeline for one URL.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeOutcome, Error> {
        let base = fetch::validate(url).map_err(|e| Error::InvalidInput(e.to_string()))?;

        if let Some(document) = self.cache.get(url).await {
            tracing::info!("cache hit: {}", url);
            return Ok(ScrapeOutcome { document, from_cache: true });
        }

        tracing::info!("scraping: {}", url);
        let response = self.fetcher.fetch(&base).await?;
        let mut document = extract::extract(&response.text(), &base);
        // echo the URL exactly as requested, not its normalized form
        document.url = url.to_string();

        self.cache.put(url, document.clone()).await;

        Ok(ScrapeOutcome { document, from_cache: false })
    }
}
