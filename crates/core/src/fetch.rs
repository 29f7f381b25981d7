//! Page fetching and URL-list input.
//!
//! [`Fetcher`] performs the single HTTP GET an audit needs and captures
//! everything the report builders read from the response. The file and
//! stdin helpers read the newline-delimited URL lists a batch runs over.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::{AuditError, Result};

/// How many leading body bytes are searched for a `<meta>` charset declaration.
const CHARSET_SNIFF_BYTES: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).expect("valid charset pattern")
});

/// HTTP client configuration for fetching audited pages.
#[derive(Debug, Clone, Default)]
pub struct FetchConfig {
    /// Request timeout in seconds. `None` leaves the client default (no timeout).
    pub timeout: Option<u64>,
    /// Custom User-Agent string. `None` sends the client default.
    pub user_agent: Option<String>,
}

/// A fetched HTTP response, reduced to what the report builders need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The URL exactly as the caller supplied it.
    pub requested_url: String,
    /// The URL after redirects.
    pub final_url: String,
    /// HTTP status code of the final response.
    pub status: u16,
    /// Time from sending the request until the response headers arrived.
    pub elapsed: Duration,
    /// Response body decoded with the charset the page declares.
    pub body: String,
}

impl FetchedPage {
    /// Elapsed time rendered the way reports show it, e.g. `"0.42 seconds"`.
    pub fn response_time(&self) -> String {
        format!("{:.2} seconds", self.elapsed.as_secs_f64())
    }
}

/// Issues exactly one GET per call with a client built once at construction.
///
/// Redirects are followed by the client default policy; nothing is retried.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds the underlying HTTP client from `config`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder.build().map_err(AuditError::HttpError)?;

        Ok(Self { client, config })
    }

    /// Fetches `url` and captures status, final URL, elapsed time and body.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidUrl`] when `url` does not parse as an
    /// http(s) URL, [`AuditError::Timeout`] when the configured timeout is
    /// exceeded, and [`AuditError::HttpError`] for every other transport failure.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed_url = Url::parse(url).map_err(|e| AuditError::InvalidUrl(format!("{url}: {e}")))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(AuditError::InvalidUrl(format!(
                "{url}: URL must use the http:// or https:// scheme"
            )));
        }

        debug!(url, "sending GET request");
        let started = Instant::now();
        let response = self.client.get(parsed_url).send().await.map_err(|e| self.map_send_error(e))?;
        let elapsed = started.elapsed();

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let body = decode_body(&bytes, content_type.as_deref());

        debug!(url, status, final_url = %final_url, bytes = bytes.len(), "received response");

        Ok(FetchedPage { requested_url: url.to_string(), final_url, status, elapsed, body })
    }

    fn map_send_error(&self, err: reqwest::Error) -> AuditError {
        match self.config.timeout {
            Some(timeout) if err.is_timeout() => AuditError::Timeout { timeout },
            _ => AuditError::HttpError(err),
        }
    }
}

/// Decodes a response body to text.
///
/// The charset comes from the `Content-Type` header, then from a `<meta charset>`
/// or `http-equiv` declaration in the first kilobyte, then defaults to UTF-8.
/// A byte order mark overrides all three. Undecodable bytes become U+FFFD.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| sniff_meta_charset(&bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)]))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(['"', '\'']).as_bytes())
    })
}

fn sniff_meta_charset(head: &[u8]) -> Option<&'static Encoding> {
    let captures = META_CHARSET.captures(head)?;
    Encoding::for_label(captures.get(1)?.as_bytes())
}

/// Reads a local file, typically a URL list.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(AuditError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(AuditError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(AuditError::from)?;

    Ok(buffer)
}
