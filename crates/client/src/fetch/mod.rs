//! HTTP fetch with bounded resources and failure classification.
//!
//! ### Request identity
//! - Desktop-browser User-Agent plus `Accept`/`Accept-Language`/
//!   `Upgrade-Insecure-Requests`; `Accept-Encoding` is handled by
//!   reqwest's transparent gzip/brotli/deflate support.
//! - Keep-alive reuse comes from reqwest's connection pool.
//!
//! ### Bounds
//! - Timeout (default 10s), max redirects (5), max body bytes (10MB).
//!
//! ### Classification
//! - 404 / 403 / other 4xx map to their own variants; 5xx and
//!   network-level failures that are not a timeout, refused
//!   connection, or DNS miss collapse into `Error::Transport`.
//! - Single attempt only. There is no retry policy.

pub mod url;

use bytes::Bytes;
use reqwest::Url;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, validate};

use sift_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: desktop Chrome).
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB).
    pub max_bytes: usize,

    /// Request timeout (default: 10s).
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5).
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            max_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_millis(10_000),
            max_redirects: 5,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The original URL requested.
    pub url: Url,
    /// The final URL after redirects.
    pub final_url: Url,
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body bytes.
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds.
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }
}

/// HTTP fetch client with bounded timeout, redirects, and body size.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL with a single GET, returning the raw body.
    ///
    /// Status mapping: >= 500 and oversized bodies surface as
    /// `Transport`; 404/403/other-4xx get their own variants; < 400 is
    /// success.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| classify_send_error(url.as_str(), &e))?;

        let status = response.status();
        let code = status.as_u16();

        if code >= 500 {
            return Err(Error::Transport(format!("server error: status {}", code)));
        }
        if code == 404 {
            return Err(Error::NotFound(url.to_string()));
        }
        if code == 403 {
            return Err(Error::Forbidden(url.to_string()));
        }
        if code >= 400 {
            return Err(Error::HttpStatus(code));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::Transport(format!("{} bytes exceeds {} byte cap", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_send_error(url.as_str(), &e))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::Transport(format!(
                "{} bytes exceeds {} byte cap",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { url: url.clone(), final_url, status, bytes, fetch_ms })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

/// Classify a reqwest error into the pipeline taxonomy.
///
/// Timeouts are flagged directly by reqwest; connection refusal shows
/// up as an `io::Error` in the source chain; DNS misses only surface
/// as resolver message text, so that final check is by content.
fn classify_send_error(url: &str, err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::Timeout(format!("{}: request timed out", url));
    }
    if err.is_redirect() {
        return Error::Transport(format!("{}: too many redirects", url));
    }

    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::ConnectionRefused
        {
            return Error::ConnectionRefused(url.to_string());
        }
        let text = inner.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return Error::DnsFailure(url.to_string());
        }
        source = inner.source();
    }

    Error::Transport(format!("{}: {}", url, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one connection with a fixed status line and HTML body,
    /// returning the URL to request.
    async fn canned_response(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        format!("http://{addr}/")
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.contains("Chrome"));
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_response_text() {
        let response = FetchResponse {
            url: Url::parse("https://example.com").unwrap(),
            final_url: Url::parse("https://example.com").unwrap(),
            status: StatusCode::OK,
            bytes: Bytes::from_static(b"<html></html>"),
            fetch_ms: 12,
        };
        assert_eq!(response.text(), "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_status_404_maps_to_not_found() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let addr = canned_response("404 Not Found", "gone").await;
        let url = Url::parse(&addr).unwrap();

        let err = client.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got: {err}");
    }

    #[tokio::test]
    async fn test_fetch_status_403_maps_to_forbidden() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let addr = canned_response("403 Forbidden", "denied").await;
        let url = Url::parse(&addr).unwrap();

        let err = client.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)), "got: {err}");
    }

    #[tokio::test]
    async fn test_fetch_status_other_4xx_carries_code() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let addr = canned_response("429 Too Many Requests", "slow down").await;
        let url = Url::parse(&addr).unwrap();

        let err = client.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus(429)), "got: {err}");
    }

    #[tokio::test]
    async fn test_fetch_status_5xx_maps_to_transport() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let addr = canned_response("500 Internal Server Error", "oops").await;
        let url = Url::parse(&addr).unwrap();

        let err = client.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got: {err}");
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let addr = canned_response("200 OK", "<html><head><title>Up</title></head></html>").await;
        let url = Url::parse(&addr).unwrap();

        let response = client.fetch(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.text().contains("<title>Up</title>"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // port 1 on loopback is never listening; refusal is immediate
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();

        let err = client.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::ConnectionRefused(_)), "got: {err}");
    }
}
