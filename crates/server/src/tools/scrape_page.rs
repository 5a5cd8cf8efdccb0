//! scrape_page tool implementation.
//!
//! Runs the full pipeline for one URL behind the admission gate and
//! returns the structured document with a cache-origin marker.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sift_client::Scraper;
use sift_core::{Error, ExtractedDocument};

use crate::ratelimit::RateLimiter;

/// Input parameters for the scrape_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrapePageParams {
    /// The absolute http(s) URL to scrape.
    pub url: String,
}

/// Output structure for the scrape_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapePageOutput {
    /// The extracted document, flattened onto the response.
    #[serde(flatten)]
    pub document: ExtractedDocument,
    /// True when the document was served from cache.
    pub from_cache: bool,
}

/// Implementation of the scrape_page tool.
///
/// `development` controls whether raw error detail is exposed to the
/// caller or replaced by the fixed public phrase per category.
pub async fn scrape_impl(
    scraper: &Scraper, limiter: &RateLimiter, development: bool, params: ScrapePageParams,
) -> Result<CallToolResult, McpError> {
    limiter.check()?;

    match scraper.scrape(&params.url).await {
        Ok(outcome) => {
            let output = ScrapePageOutput { document: outcome.document, from_cache: outcome.from_cache };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| Error::Internal(format!("failed to serialize output: {e}")).to_mcp(development))?;

            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(err) => {
            tracing::error!("scrape error: {}", err);
            Err(err.to_mcp(development))
        }
    }
}
