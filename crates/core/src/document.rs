//! Structured document produced by a successful scrape.
//!
//! Field names serialize in camelCase (`scrapedAt`, `ogTitle`,
//! `totalHeadings`, ...) which is the wire format cached documents and
//! tool responses share. A document is immutable once built; the
//! `stats` block is derived from the retained collections at
//! construction time.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything extracted from one fetched page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    /// The canonical URL that was fetched.
    pub url: String,
    /// When extraction happened (UTC).
    pub scraped_at: DateTime<Utc>,
    /// Page title, never empty ("No title" fallback).
    pub title: String,
    /// Fixed set of meta tag values, empty string when absent.
    pub meta: PageMeta,
    /// Headings grouped by level h1..h6, empty text excluded.
    pub headings: Vec<Heading>,
    /// Whitespace-normalized paragraphs longer than 20 characters.
    pub paragraphs: Vec<String>,
    /// Deduplicated absolute http(s) links in document order.
    pub links: Vec<PageLink>,
    /// Deduplicated images in document order.
    pub images: Vec<PageImage>,
    /// Counts derived from the collections above.
    pub stats: PageStats,
}

/// The six meta fields the extractor looks up. No fallback chaining
/// between plain and OpenGraph variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
}

/// A heading with its level (1..=6) and trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// A link with its resolved absolute URL and trimmed anchor text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageLink {
    pub url: String,
    pub text: String,
}

/// An image with its resolved src and optional alt/title text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageImage {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// Summary counts over the retained collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub total_headings: usize,
    pub total_paragraphs: usize,
    pub total_links: usize,
    pub total_images: usize,
    /// Whitespace-delimited tokens summed over retained paragraphs only.
    pub word_count: usize,
}

impl PageStats {
    /// Derive stats from the retained collections. Keeps the invariant
    /// that every `total_*` equals the length of its collection.
    pub fn derive(
        headings: &[Heading], paragraphs: &[String], links: &[PageLink], images: &[PageImage],
    ) -> Self {
        Self {
            total_headings: headings.len(),
            total_paragraphs: paragraphs.len(),
            total_links: links.len(),
            total_images: images.len(),
            word_count: paragraphs.iter().map(|p| p.split_whitespace().count()).sum(),
        }
    }
}
