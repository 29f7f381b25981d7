//! Basic report builder.
//!
//! A compact report: HTTP facts, title and description, a whitespace word
//! count, H1-H3 counts, link totals under [`LinkPolicy::HostComponent`], and
//! image totals.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::fetch::{FetchedPage, Fetcher};
use crate::links::LinkPolicy;
use crate::parse::Document;
use crate::report::{HttpInfo, Report};
use crate::Result;

/// The basic audit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicReport {
    pub http: HttpInfo,
    pub metadata: BasicMetadata,
    pub content: ContentStats,
    pub links: LinkStats,
    pub images: ImageStats,
}

/// Title and meta description, `None`/0 when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicMetadata {
    pub title: Option<String>,
    pub title_length: usize,
    pub description: Option<String>,
    pub description_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub word_count: usize,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageStats {
    pub total_images: usize,
    pub images_without_alt: usize,
}

impl BasicReport {
    /// Builds the report from an already fetched page. Performs no I/O.
    ///
    /// `using_https` follows the URL the caller asked for, not the final URL.
    pub fn from_page(page: &FetchedPage) -> Result<Self> {
        let doc = Document::parse(&page.body)?;

        let title = doc.title().filter(|title| !title.is_empty());
        let description = doc.meta_content("name", "description");

        let metadata = BasicMetadata {
            title_length: title.as_deref().map_or(0, |t| t.chars().count()),
            title,
            description_length: description.as_deref().map_or(0, |d| d.chars().count()),
            description,
        };

        let content = ContentStats {
            word_count: doc.visible_text().split_whitespace().count(),
            h1_count: doc.count("h1")?,
            h2_count: doc.count("h2")?,
            h3_count: doc.count("h3")?,
        };

        let anchors = doc.select("a")?;
        let counts = LinkPolicy::HostComponent.tally(anchors.iter().map(|a| a.attr("href")));
        let links =
            LinkStats { total_links: counts.total, internal_links: counts.internal, external_links: counts.external };

        let images = doc.select("img")?;
        let images = ImageStats {
            total_images: images.len(),
            images_without_alt: images.iter().filter(|img| img.non_empty_attr("alt").is_none()).count(),
        };

        Ok(Self { http: HttpInfo::new(page, &page.requested_url), metadata, content, links, images })
    }
}

/// Fetches `url` and builds its basic report.
///
/// Never fails: fetch and parse errors come back as [`Report::Error`].
pub async fn basic_audit(fetcher: &Fetcher, url: &str) -> Report {
    info!(url, "running basic audit");

    let result = match fetcher.fetch(url).await {
        Ok(page) => BasicReport::from_page(&page),
        Err(err) => Err(err),
    };

    match &result {
        Ok(report) => debug!(url, status = report.http.status, "basic audit complete"),
        Err(err) => warn!(url, error = %err, "basic audit failed"),
    }

    Report::from(result)
}
