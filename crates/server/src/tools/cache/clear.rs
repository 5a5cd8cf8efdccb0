//! cache_clear tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sift_core::{DocumentCache, Error};

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearOutput {
    /// Always true; failure is reported as an error instead.
    pub success: bool,
}

/// Implementation of the cache_clear tool. Drops every entry; the
/// cumulative hit/miss counters are left alone.
pub async fn clear_impl(cache: &DocumentCache) -> Result<CallToolResult, McpError> {
    cache.flush_all().await;
    tracing::info!("cache cleared");

    let output = CacheClearOutput { success: true };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Internal(format!("failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
