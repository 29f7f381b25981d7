//! Report envelope shared by both audit variants.
//!
//! Builders return `Result<BasicReport>` / `Result<FullReport>`. The audit
//! boundary folds the error side into [`Report::Error`], which serializes as
//! `{"error": "<message>"}` so a failed URL renders like any other report.

use serde::Serialize;

use crate::basic::BasicReport;
use crate::fetch::FetchedPage;
use crate::full::FullReport;
use crate::{AuditError, Result};

/// One URL's audit result in its serialized shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Basic(Box<BasicReport>),
    Full(Box<FullReport>),
    Error(ErrorReport),
}

/// The single-key report produced when fetching or parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl Report {
    /// Builds the error-shaped report for `err`.
    pub fn from_error(err: &AuditError) -> Self {
        Report::Error(ErrorReport { error: err.to_string() })
    }

    /// Whether this is the `{"error": ...}` variant.
    pub fn is_error(&self) -> bool {
        matches!(self, Report::Error(_))
    }

    /// The error message, if this is an error report.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Report::Error(report) => Some(&report.error),
            _ => None,
        }
    }

    /// Serializes the report into a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(AuditError::from)
    }
}

impl From<Result<BasicReport>> for Report {
    fn from(result: Result<BasicReport>) -> Self {
        match result {
            Ok(report) => Report::Basic(Box::new(report)),
            Err(err) => Report::from_error(&err),
        }
    }
}

impl From<Result<FullReport>> for Report {
    fn from(result: Result<FullReport>) -> Self {
        match result {
            Ok(report) => Report::Full(Box::new(report)),
            Err(err) => Report::from_error(&err),
        }
    }
}

/// The `http` section, identical in both variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpInfo {
    pub status: u16,
    pub using_https: bool,
    pub response_time: String,
}

impl HttpInfo {
    /// Builds the section; `url` decides `using_https`.
    pub fn new(page: &FetchedPage, url: &str) -> Self {
        Self { status: page.status, using_https: url.starts_with("https://"), response_time: page.response_time() }
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders an error with every `source()` beneath it, outermost first.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_report_shape() {
        let report = Report::from_error(&AuditError::InvalidUrl("nope".to_string()));
        let json = report.to_json().unwrap();

        assert!(report.is_error());
        assert_eq!(json, serde_json::json!({"error": "Invalid URL: nope"}));
        assert_eq!(report.error_message(), Some("Invalid URL: nope"));
    }

    #[test]
    fn test_http_info_uses_given_url() {
        let page = FetchedPage {
            requested_url: "http://example.com".to_string(),
            final_url: "https://example.com/".to_string(),
            status: 200,
            elapsed: Duration::from_millis(50),
            body: String::new(),
        };

        assert!(!HttpInfo::new(&page, &page.requested_url).using_https);
        assert!(HttpInfo::new(&page, &page.final_url).using_https);
        assert_eq!(HttpInfo::new(&page, &page.final_url).response_time, "0.05 seconds");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(2.0 / 3.0 * 100.0), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = AuditError::Io(io);
        assert_eq!(error_chain(&err), "I/O error: connection refused: connection refused");
    }
}
