//! Structured content extraction from raw HTML.
//!
//! The extractor is a pure function of markup, base URL, and
//! timestamp: no network access, and malformed markup never fails
//! because html5ever recovers best-effort. Absent elements produce
//! empty fields and collections.
//!
//! ### Scan rules
//! - Title: `<title>` text, else first `<h1>`, else `"No title"`.
//! - Headings: swept per level h1 through h6. All h1s come before all
//!   h2s even when the page interleaves them; this matches the order
//!   the scrape output has always had.
//! - Paragraphs: whitespace runs collapsed to single spaces, kept only
//!   when longer than 20 characters.
//! - Links and images: see [`links`].

pub mod links;

pub use links::{extract_images, extract_links, resolve_reference};

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use sift_core::document::{ExtractedDocument, Heading, PageMeta, PageStats};

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Swappable extraction engine.
///
/// The default implementation is backed by `scraper`; anything that
/// can turn markup into an [`ExtractedDocument`] with the same scan
/// rules can stand in for it.
pub trait Extractor: Send + Sync {
    /// Extract a structured document from raw HTML.
    fn extract(&self, html: &str, base_url: &Url, scraped_at: DateTime<Utc>) -> ExtractedDocument;
}

/// html5ever-backed extractor.
#[derive(Debug, Default)]
pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn extract(&self, html: &str, base_url: &Url, scraped_at: DateTime<Utc>) -> ExtractedDocument {
        let document = Html::parse_document(html);

        let headings = extract_headings(&document);
        let paragraphs = extract_paragraphs(&document);
        let links = extract_links(&document, base_url);
        let images = extract_images(&document, base_url);
        let stats = PageStats::derive(&headings, &paragraphs, &links, &images);

        ExtractedDocument {
            url: base_url.to_string(),
            scraped_at,
            title: extract_title(&document),
            meta: extract_meta(&document),
            headings,
            paragraphs,
            links,
            images,
            stats,
        }
    }
}

/// Extract a document, stamping it with the current time.
pub fn extract(html: &str, base_url: &Url) -> ExtractedDocument {
    extract_at(html, base_url, Utc::now())
}

/// Extract a document with an explicit timestamp.
///
/// Deterministic: identical markup, base URL, and timestamp produce an
/// identical document.
pub fn extract_at(html: &str, base_url: &Url, scraped_at: DateTime<Utc>) -> ExtractedDocument {
    HtmlExtractor.extract(html, base_url, scraped_at)
}

fn extract_title(document: &Html) -> String {
    let title = document
        .select(&sel("title"))
        .next()
        .map(element_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    if let Some(title) = title {
        return title;
    }

    document
        .select(&sel("h1"))
        .next()
        .map(element_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title".to_string())
}

fn meta_content(document: &Html, css: &str) -> String {
    document
        .select(&sel(css))
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

fn extract_meta(document: &Html) -> PageMeta {
    PageMeta {
        description: meta_content(document, r#"meta[name="description"]"#),
        keywords: meta_content(document, r#"meta[name="keywords"]"#),
        author: meta_content(document, r#"meta[name="author"]"#),
        og_title: meta_content(document, r#"meta[property="og:title"]"#),
        og_description: meta_content(document, r#"meta[property="og:description"]"#),
        og_image: meta_content(document, r#"meta[property="og:image"]"#),
    }
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    let mut headings = Vec::new();
    for level in 1..=6u8 {
        let selector = sel(&format!("h{level}"));
        for element in document.select(&selector) {
            let text = element_text(element).trim().to_string();
            if !text.is_empty() {
                headings.push(Heading { level, text });
            }
        }
    }
    headings
}

fn extract_paragraphs(document: &Html) -> Vec<String> {
    let selector = sel("p");
    document
        .select(&selector)
        .map(|el| element_text(el).split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| text.chars().count() > 20)
        .collect()
}
