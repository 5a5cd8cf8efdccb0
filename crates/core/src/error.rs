//! Unified error taxonomy for the scrape pipeline.
//!
//! Every failure the pipeline can surface is a closed variant here so
//! callers match on structure instead of probing message strings.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error type for the scrape pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input failed URL validation before any cache or network access.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The fetch exceeded its configured timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    Timeout(String),

    /// Target responded with HTTP 404.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Target responded with HTTP 403.
    #[error("FORBIDDEN: {0}")]
    Forbidden(String),

    /// Any other client-error status in [400, 500).
    #[error("HTTP_ERROR: status {0}")]
    HttpStatus(u16),

    /// DNS resolution failed for the target host.
    #[error("DNS_FAILURE: {0}")]
    DnsFailure(String),

    /// The target host actively refused the connection.
    #[error("CONNECTION_REFUSED: {0}")]
    ConnectionRefused(String),

    /// Unclassified transport failure (5xx, oversized body, TLS, redirect loop, ...).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// Unexpected internal failure (serialization, extraction, ...).
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl Error {
    /// Stable numeric code for the MCP error surface.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidInput(_) => -32602,
            Error::Internal(_) => -32000,
            Error::Timeout(_) => -32001,
            Error::NotFound(_) => -32002,
            Error::Forbidden(_) => -32003,
            Error::HttpStatus(_) => -32004,
            Error::DnsFailure(_) => -32005,
            Error::ConnectionRefused(_) => -32006,
            Error::Transport(_) => -32007,
        }
    }

    /// Fixed caller-facing phrase, used when internal detail must stay hidden.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidInput(_) => "Invalid URL".into(),
            Error::Timeout(_) => "Request timeout".into(),
            Error::NotFound(_) => "Page not found".into(),
            Error::Forbidden(_) => "Access denied".into(),
            Error::HttpStatus(status) => format!("HTTP error {status}"),
            Error::DnsFailure(_) => "Domain not found".into(),
            Error::ConnectionRefused(_) => "Connection refused".into(),
            Error::Transport(_) | Error::Internal(_) => "Scraping failed".into(),
        }
    }

    /// Convert to an MCP error, exposing internal detail only when requested.
    ///
    /// Production servers pass `include_detail = false` so raw transport and
    /// parser messages never leak to callers.
    pub fn to_mcp(&self, include_detail: bool) -> McpError {
        let message = if include_detail { self.to_string() } else { self.public_message() };
        McpError { code: ErrorCode(self.code()), message: message.into(), data: None }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        err.to_mcp(true)
    }
}
