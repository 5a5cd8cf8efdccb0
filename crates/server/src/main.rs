//! mcp-scrape server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use sift_client::Scraper;
use sift_core::{AppConfig, DocumentCache};
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod ratelimit;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let cache = Arc::new(DocumentCache::with_ttl(config.cache_ttl()));
    let _sweeper = cache.spawn_sweeper(config.sweep_interval());

    let scraper = Arc::new(Scraper::new(&config, Arc::clone(&cache))?);
    let limiter = Arc::new(ratelimit::RateLimiter::new(config.rate_limit_window(), config.rate_limit_max));

    tracing::info!("Starting mcp-scrape server on stdio transport");

    let handler = handler::McpScrapeServer::new(&config, scraper, limiter);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
