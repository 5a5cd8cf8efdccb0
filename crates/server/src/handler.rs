//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::ratelimit::RateLimiter;
use crate::tools::cache::{clear_impl, stats_impl};
use crate::tools::scrape_page::{ScrapePageParams, scrape_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use sift_client::Scraper;
use sift_core::AppConfig;

/// The main MCP server handler for mcp-scrape.
#[derive(Clone)]
pub struct McpScrapeServer {
    tool_router: ToolRouter<Self>,
    scraper: Arc<Scraper>,
    limiter: Arc<RateLimiter>,
    development: bool,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl McpScrapeServer {
    /// Create a new server handler over a shared scraper and admission gate.
    pub fn new(config: &AppConfig, scraper: Arc<Scraper>, limiter: Arc<RateLimiter>) -> Self {
        Self { tool_router: Self::tool_router(), scraper, limiter, development: config.development }
    }

    /// Scrape one page through the full pipeline.
    ///
    /// Cached results are served without refetching; the response
    /// carries a `fromCache` marker either way.
    #[tool(
        description = "Fetch a web page and return structured content: title, meta tags, headings, paragraphs, links, images, and summary stats. Results are cached per URL."
    )]
    async fn scrape_page(&self, params: Parameters<ScrapePageParams>) -> Result<CallToolResult, McpError> {
        scrape_impl(&self.scraper, &self.limiter, self.development, params.0).await
    }

    /// Report cache occupancy and cumulative hit/miss counters.
    #[tool(description = "Report document cache statistics: live entry count, cumulative hits and misses.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(self.scraper.cache()).await
    }

    /// Drop every cached document immediately.
    #[tool(description = "Flush the document cache. Usage counters are preserved.")]
    async fn cache_clear(&self) -> Result<CallToolResult, McpError> {
        clear_impl(self.scraper.cache()).await
    }
}

impl ServerHandler for McpScrapeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-scrape".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
