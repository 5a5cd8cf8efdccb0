//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-scrape server.
#![allow(unused_imports)]

pub mod cache;
pub mod scrape_page;

pub use scrape_page::{ScrapePageOutput, ScrapePageParams};
