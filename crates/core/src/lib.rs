//! Core types and shared functionality for mcp-scrape.
//!
//! This crate provides:
//! - In-memory TTL cache for extracted documents
//! - The extracted document data model
//! - Unified error taxonomy
//! - Layered configuration

pub mod cache;
pub mod config;
pub mod document;
pub mod error;

pub use cache::{CacheStats, DocumentCache};
pub use config::AppConfig;
pub use document::{ExtractedDocument, Heading, PageImage, PageLink, PageMeta, PageStats};
pub use error::Error;
