pub mod basic;
pub mod batch;
pub mod config;
pub mod error;
pub mod fetch;
pub mod full;
pub mod links;
pub mod parse;
pub mod render;
pub mod report;
pub mod summarize;

pub use basic::{BasicMetadata, BasicReport, ContentStats, ImageStats, LinkStats, basic_audit};
pub use batch::{AuditOutcome, Auditor, BatchEvent, BatchSummary, parse_url_list};
pub use config::{AuditConfig, AuditConfigBuilder, AuditMode};
pub use error::{AuditError, Result};
pub use fetch::{FetchConfig, FetchedPage, Fetcher, decode_body, fetch_file, fetch_stdin};
pub use full::{FullReport, InputType, full_audit};
pub use links::{LinkCounts, LinkPolicy, split_url};
pub use parse::{Document, Element};
pub use render::{DEFAULT_WRAP_WIDTH, render_report, wrap_strings, wrap_text};
pub use report::{ErrorReport, HttpInfo, Report};
pub use summarize::{ANALYSIS_FAILED, Summarizer, SummarizerConfig, build_prompt};
