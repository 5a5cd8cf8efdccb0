//! URL validation for scrape requests and discovered references.
//!
//! A URL is acceptable iff it parses as an absolute URL with an
//! `http` or `https` scheme. No normalization is applied beyond what
//! the `url` crate's parser does; the raw input string stays the
//! cache key.

/// Error type for URL validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Validate that a string is an absolute http(s) URL.
///
/// Relative references fail to parse (no base) and are rejected, as
/// are non-http schemes like `ftp:` or `mailto:`. No network access.
pub fn validate(input: &str) -> Result<url::Url, UrlError> {
    if input.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(input).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}
