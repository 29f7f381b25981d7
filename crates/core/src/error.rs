//! Error types for audit operations.
//!
//! This module defines the main error type [`AuditError`] which represents
//! every failure that can occur while fetching a page, building a report,
//! or asking the language model for commentary.
//!
//! # Example
//!
//! ```rust
//! use seo_auditor_core::{AuditError, Result};
//!
//! fn require_body(body: &str) -> Result<&str> {
//!     if body.is_empty() {
//!         return Err(AuditError::HtmlParseError("empty body".to_string()));
//!     }
//!     Ok(body)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audit operations.
///
/// Builders return this through [`Result`]; the audit boundary turns it into
/// an error-shaped [`Report`](crate::Report) so a batch never stops on one URL.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Transport failure from reqwest while fetching a page or calling the API.
    ///
    /// Covers DNS lookups, refused connections and TLS handshakes.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or has no http(s) scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading URL lists.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report or wire-format (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid configuration, such as an unset API key.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The chat-completion endpoint answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The chat-completion endpoint answered with something we cannot use.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),
}

/// `Result` specialised to [`AuditError`].
pub type Result<T> = std::result::Result<T, AuditError>;
