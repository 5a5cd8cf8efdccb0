//! Server-level errors raised before the pipeline runs.
//!
//! The admission gate sits upstream of validation, so its rejection is
//! not part of the pipeline taxonomy in `sift-core`.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Errors from the pre-pipeline admission gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The fixed-window rate limit was exhausted.
    #[error("RATE_LIMITED: request budget for the current window is exhausted")]
    RateLimited,
}

impl From<GateError> for McpError {
    fn from(err: GateError) -> Self {
        let (code, message) = match &err {
            GateError::RateLimited => (-32029, "Too many requests".to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
