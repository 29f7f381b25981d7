//! Sequential batch auditing.
//!
//! [`Auditor`] owns the fetcher and the optional summarizer for a run and
//! audits one URL at a time: fetch, build the report, ask for commentary.
//! [`Auditor::run`] walks a URL list from any start index and reports each
//! step to a callback, which may stop the run between URLs. The returned
//! [`BatchSummary`] says where to resume.

use std::ops::ControlFlow;

use serde::Serialize;
use tracing::{info, warn};

use crate::basic::basic_audit;
use crate::config::{AuditConfig, AuditMode};
use crate::fetch::Fetcher;
use crate::full::full_audit;
use crate::render::render_report;
use crate::report::Report;
use crate::summarize::Summarizer;
use crate::Result;

/// Splits a newline-delimited URL list.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Everything produced for one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditOutcome {
    pub url: String,
    pub report: Report,
    /// Model commentary; `None` when AI analysis is disabled.
    pub analysis: Option<String>,
}

impl AuditOutcome {
    /// The report wrapped and pretty-printed for display.
    pub fn render(&self, width: usize) -> Result<String> {
        render_report(&self.report, width)
    }
}

/// Progress notifications sent to the [`Auditor::run`] callback.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// About to audit `urls[index]`. Breaking here skips it.
    Started { index: usize, total: usize, url: &'a str },
    /// Finished `urls[index]`. Breaking here stops before the next URL.
    Finished { index: usize, total: usize, outcome: &'a AuditOutcome },
}

/// Where a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// URLs audited by this run.
    pub processed: usize,
    /// Index to pass as `start` to resume.
    pub next_index: usize,
    pub total: usize,
    /// Whether the callback stopped the run early.
    pub cancelled: bool,
}

impl BatchSummary {
    /// Whether every URL has been audited.
    pub fn is_complete(&self) -> bool {
        self.next_index >= self.total
    }

    /// The `start` index to resume from, when the run was stopped with URLs left.
    pub fn resume_index(&self) -> Option<usize> {
        (self.cancelled && !self.is_complete()).then_some(self.next_index)
    }
}

/// Audits URLs one at a time with a fetcher and summarizer built once.
#[derive(Debug, Clone)]
pub struct Auditor {
    mode: AuditMode,
    fetcher: Fetcher,
    summarizer: Option<Summarizer>,
    wrap_width: usize,
}

impl Auditor {
    /// Builds the HTTP clients described by `config`.
    pub fn new(config: AuditConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch)?;
        let summarizer = config.summarizer.map(Summarizer::new).transpose()?;

        Ok(Self { mode: config.mode, fetcher, summarizer, wrap_width: config.wrap_width })
    }

    pub fn mode(&self) -> AuditMode {
        self.mode
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// The summarizer outcomes are analyzed with; `None` when AI analysis is off.
    pub fn summarizer(&self) -> Option<&Summarizer> {
        self.summarizer.as_ref()
    }

    /// Audits one URL. Never fails; failures are inside the outcome.
    pub async fn audit(&self, url: &str) -> AuditOutcome {
        let report = match self.mode {
            AuditMode::Basic => basic_audit(&self.fetcher, url).await,
            AuditMode::Full => full_audit(&self.fetcher, url).await,
        };

        let analysis = match &self.summarizer {
            Some(summarizer) => Some(summarizer.analyze(&report).await),
            None => None,
        };

        AuditOutcome { url: url.to_string(), report, analysis }
    }

    /// Audits `urls[start..]` in order, reporting each step to `on_progress`.
    ///
    /// Returning [`ControlFlow::Break`] from the callback stops the run; the
    /// summary's `next_index` is the first URL not yet audited.
    pub async fn run<F>(&self, urls: &[String], start: usize, mut on_progress: F) -> BatchSummary
    where
        F: FnMut(BatchEvent<'_>) -> ControlFlow<()>,
    {
        let total = urls.len();
        let mut processed = 0;
        let mut index = start.min(total);

        info!(total, start = index, mode = %self.mode, "starting batch");

        while index < total {
            let url = &urls[index];

            if on_progress(BatchEvent::Started { index, total, url }).is_break() {
                warn!(index, "batch cancelled before audit");
                return BatchSummary { processed, next_index: index, total, cancelled: true };
            }

            let outcome = self.audit(url).await;
            processed += 1;
            index += 1;

            if on_progress(BatchEvent::Finished { index: index - 1, total, outcome: &outcome }).is_break() {
                warn!(index, "batch cancelled");
                return BatchSummary { processed, next_index: index, total, cancelled: true };
            }
        }

        info!(processed, "batch complete");
        BatchSummary { processed, next_index: index, total, cancelled: false }
    }
}
