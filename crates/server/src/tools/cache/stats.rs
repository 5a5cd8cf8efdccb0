//! cache_stats tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use sift_core::{DocumentCache, Error};

/// Implementation of the cache_stats tool.
///
/// Reports live entry count plus cumulative hit/miss counters for the
/// process lifetime.
pub async fn stats_impl(cache: &DocumentCache) -> Result<CallToolResult, McpError> {
    let stats = cache.stats().await;

    let json = serde_json::to_string_pretty(&stats)
        .map_err(|e| Error::Internal(format!("failed to serialize stats: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sift_core::CacheStats;
    use sift_core::document::{ExtractedDocument, PageMeta, PageStats};

    fn make_doc(url: &str) -> ExtractedDocument {
        ExtractedDocument {
            url: url.to_string(),
            scraped_at: Utc::now(),
            title: "Test".into(),
            meta: PageMeta::default(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            stats: PageStats::default(),
        }
    }

    #[tokio::test]
    async fn test_stats_reflect_usage() {
        let cache = DocumentCache::new();
        cache.put("https://example.com", make_doc("https://example.com")).await;
        cache.get("https://example.com").await;
        cache.get("https://missing.com").await;

        let result = stats_impl(&cache).await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("expected text content");
        let stats: CacheStats = serde_json::from_str(text).unwrap();

        assert_eq!(stats.keys, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
