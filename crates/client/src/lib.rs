//! Client code for mcp-scrape.
//!
//! This crate provides the scrape pipeline: URL validation, bounded
//! HTTP fetch with failure classification, structured HTML extraction,
//! and the orchestrator that composes them over the shared cache.

pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use extract::{Extractor, HtmlExtractor, extract, extract_at, extract_images, extract_links};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, UrlError, validate};

pub use pipeline::{ScrapeOutcome, Scraper};
