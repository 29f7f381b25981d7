//! Run configuration.
//!
//! [`AuditConfig`] gathers everything an [`Auditor`](crate::Auditor) needs:
//! the audit mode, the HTTP client settings, the optional language-model
//! settings and the render width. It is built explicitly and handed over at
//! construction; nothing is read from the environment behind the caller's back.
//!
//! # Example
//!
//! ```rust
//! use seo_auditor_core::{AuditConfig, AuditMode};
//!
//! let config = AuditConfig::builder()
//!     .mode(AuditMode::Full)
//!     .timeout(Some(10))
//!     .wrap_width(100)
//!     .build();
//! assert!(config.summarizer.is_none());
//! ```

use std::str::FromStr;

use crate::fetch::FetchConfig;
use crate::render::DEFAULT_WRAP_WIDTH;
use crate::summarize::SummarizerConfig;

/// Which report an audit builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuditMode {
    /// The compact built-in report.
    #[default]
    Basic,
    /// The extended report with metadata, link and image listings.
    Full,
}

impl FromStr for AuditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "simple" => Ok(Self::Basic),
            "full" => Ok(Self::Full),
            _ => Err(format!("Invalid mode: {}. Valid options: basic, full", s)),
        }
    }
}

impl std::fmt::Display for AuditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditMode::Basic => write!(f, "basic"),
            AuditMode::Full => write!(f, "full"),
        }
    }
}

/// Configuration for a batch of audits.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Report variant to build (default: basic).
    pub mode: AuditMode,

    /// HTTP client settings for page fetches.
    pub fetch: FetchConfig,

    /// Language-model settings; `None` skips AI analysis.
    pub summarizer: Option<SummarizerConfig>,

    /// Line width for rendered reports (default: 80, 0 disables wrapping).
    pub wrap_width: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { mode: AuditMode::default(), fetch: FetchConfig::default(), summarizer: None, wrap_width: DEFAULT_WRAP_WIDTH }
    }
}

impl AuditConfig {
    /// Creates a new builder for AuditConfig.
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }
}

/// Builder for AuditConfig.
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AuditConfig::default() }
    }

    /// Sets the audit mode.
    pub fn mode(mut self, value: AuditMode) -> Self {
        self.config.mode = value;
        self
    }

    /// Sets the fetch timeout in seconds; `None` uses the client default.
    pub fn timeout(mut self, value: Option<u64>) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets a custom User-Agent for page fetches.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = Some(value.into());
        self
    }

    /// Enables AI analysis with the given settings.
    pub fn summarizer(mut self, value: SummarizerConfig) -> Self {
        self.config.summarizer = Some(value);
        self
    }

    /// Sets the render width.
    pub fn wrap_width(mut self, value: usize) -> Self {
        self.config.wrap_width = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AuditConfig {
        self.config
    }
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.mode, AuditMode::Basic);
        assert_eq!(config.fetch.timeout, None);
        assert!(config.summarizer.is_none());
        assert_eq!(config.wrap_width, 80);
    }

    #[test]
    fn test_builder() {
        let config = AuditConfig::builder()
            .mode(AuditMode::Full)
            .timeout(None)
            .user_agent("bot/1.0")
            .summarizer(SummarizerConfig::new("key"))
            .wrap_width(0)
            .build();

        assert_eq!(config.mode, AuditMode::Full);
        assert_eq!(config.fetch.timeout, None);
        assert_eq!(config.fetch.user_agent.as_deref(), Some("bot/1.0"));
        assert_eq!(config.summarizer.map(|s| s.api_key), Some("key".to_string()));
        assert_eq!(config.wrap_width, 0);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("basic".parse::<AuditMode>(), Ok(AuditMode::Basic));
        assert_eq!("Simple".parse::<AuditMode>(), Ok(AuditMode::Basic));
        assert_eq!("FULL".parse::<AuditMode>(), Ok(AuditMode::Full));
        assert!("deep".parse::<AuditMode>().is_err());
        assert_eq!(AuditMode::Full.to_string(), "full");
    }
}
