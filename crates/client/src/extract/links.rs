//! Link and image harvesting with relative URL fixing.
//!
//! Only hrefs that start with `/`, `./`, or `../` are resolved against
//! the base URL; everything else is taken verbatim. Links are then
//! restricted to `http`-prefixed results, images are not. Both
//! collections deduplicate by resolved URL, first occurrence wins.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use sift_core::document::{PageImage, PageLink};

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// Resolve a discovered reference against the page base URL.
///
/// Returns `None` when a relative reference fails to resolve, which
/// drops the element silently. References without one of the three
/// relative prefixes pass through untouched, so schemes like
/// `mailto:` survive to the caller's filter.
pub fn resolve_reference(raw: &str, base_url: &Url) -> Option<String> {
    if raw.starts_with('/') || raw.starts_with("./") || raw.starts_with("../") {
        base_url.join(raw).ok().map(|u| u.to_string())
    } else {
        Some(raw.to_string())
    }
}

/// Extract deduplicated absolute links in document order.
///
/// Anchors without an href are skipped; resolved URLs must start with
/// `http`. Empty anchor text becomes the literal `"Link"`.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<PageLink> {
    let selector = sel("a");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let resolved = match resolve_reference(href, base_url) {
            Some(u) => u,
            None => continue,
        };

        if !resolved.starts_with("http") || seen.contains(&resolved) {
            continue;
        }
        seen.insert(resolved.clone());

        let text = element.text().collect::<String>().trim().to_string();
        let text = if text.is_empty() { "Link".to_string() } else { text };

        links.push(PageLink { url: resolved, text });
    }

    links
}

/// Extract deduplicated images in document order.
///
/// Images without a src are skipped. Unlike links, any resolved src is
/// accepted, so `data:` URIs and bare relative paths survive.
pub fn extract_images(document: &Html, base_url: &Url) -> Vec<PageImage> {
    let selector = sel("img");

    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for element in document.select(&selector) {
        let src = match element.value().attr("src") {
            Some(s) => s,
            None => continue,
        };

        let resolved = match resolve_reference(src, base_url) {
            Some(u) => u,
            None => continue,
        };

        if seen.contains(&resolved) {
            continue;
        }
        seen.insert(resolved.clone());

        images.push(PageImage {
            src: resolved,
            alt: element.value().attr("alt").unwrap_or_default().to_string(),
            title: element.value().attr("title").unwrap_or_default().to_string(),
        });
    }

    images
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn base() -> Url {
        Url::parse("https://x.com").unwrap()
    }

    #[test]
    fn test_extract_links_basic() {
        let doc = parse(r#"<a href="https://example.com">Example</a>"#);
        let links = extract_links(&doc, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[0].text, "Example");
    }

    #[test]
    fn test_extract_links_root_relative_resolved() {
        let doc = parse(r#"<a href="/about">About</a>"#);
        let links = extract_links(&doc, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://x.com/about");
    }

    #[test]
    fn test_extract_links_dot_relative_resolved() {
        let doc = parse(r#"<a href="./a">Here</a><a href="../up">Up</a>"#);
        let links = extract_links(&doc, &Url::parse("https://x.com/dir/page").unwrap());

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://x.com/dir/a");
        assert_eq!(links[1].url, "https://x.com/up");
    }

    #[test]
    fn test_extract_links_bare_relative_dropped() {
        // no `/`, `./`, or `../` prefix, so no resolution happens and
        // the http filter drops it
        let doc = parse(r#"<a href="page.html">Page</a>"#);
        let links = extract_links(&doc, &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_mailto_dropped() {
        let doc = parse(r#"<a href="mailto:hi@x.com">Mail</a><a href="javascript:void(0)">JS</a>"#);
        let links = extract_links(&doc, &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_duplicate_first_wins() {
        let doc = parse(r#"<a href="/a">First</a><a href="/a">Second</a>"#);
        let links = extract_links(&doc, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://x.com/a");
        assert_eq!(links[0].text, "First");
    }

    #[test]
    fn test_extract_links_empty_text_fallback() {
        let doc = parse(r#"<a href="https://example.com"></a>"#);
        let links = extract_links(&doc, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "Link");
    }

    #[test]
    fn test_extract_links_no_href_skipped() {
        let doc = parse(r#"<a name="anchor">No href</a><a href="https://example.com">Yes</a>"#);
        let links = extract_links(&doc, &base());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_links_protocol_relative() {
        let doc = parse(r#"<a href="//cdn.x.com/lib.js">CDN</a>"#);
        let links = extract_links(&doc, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://cdn.x.com/lib.js");
    }

    #[test]
    fn test_extract_images_basic() {
        let doc = parse(r#"<img src="/logo.png" alt="Logo" title="The logo">"#);
        let images = extract_images(&doc, &base());

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "https://x.com/logo.png");
        assert_eq!(images[0].alt, "Logo");
        assert_eq!(images[0].title, "The logo");
    }

    #[test]
    fn test_extract_images_attr_defaults() {
        let doc = parse(r#"<img src="https://x.com/a.png">"#);
        let images = extract_images(&doc, &base());

        assert_eq!(images[0].alt, "");
        assert_eq!(images[0].title, "");
    }

    #[test]
    fn test_extract_images_no_scheme_filter() {
        // unlike links, non-http srcs are kept as-is
        let doc = parse(r#"<img src="data:image/gif;base64,R0lGOD"><img src="pic.jpg">"#);
        let images = extract_images(&doc, &base());

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].src, "data:image/gif;base64,R0lGOD");
        assert_eq!(images[1].src, "pic.jpg");
    }

    #[test]
    fn test_extract_images_duplicate_first_wins() {
        let doc = parse(r#"<img src="/a.png" alt="one"><img src="/a.png" alt="two">"#);
        let images = extract_images(&doc, &base());

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].alt, "one");
    }

    #[test]
    fn test_extract_images_no_src_skipped() {
        let doc = parse(r#"<img alt="decorative"><img src="/real.png">"#);
        let images = extract_images(&doc, &base());
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_resolve_reference_passthrough() {
        let resolved = resolve_reference("https://other.com/p", &base()).unwrap();
        assert_eq!(resolved, "https://other.com/p");
    }
}
