//! Full report builder.
//!
//! The full report is a superset of the basic one: it classifies the input
//! URL, analyses title and description text, collects the head metadata a
//! crawler reads, counts all heading levels, measures anchor-text density,
//! and lists every link and image. Links are classified with
//! [`LinkPolicy::SchemePrefix`], which can disagree with the basic report.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::fetch::{FetchedPage, Fetcher};
use crate::links::{LinkPolicy, split_url};
use crate::parse::{Document, Element};
use crate::report::{HttpInfo, Report, error_chain, round2};
use crate::Result;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

/// The full audit report. Key names and order match the rendered output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    #[serde(rename = "Input")]
    pub input: InputInfo,
    pub http: HttpInfo,
    pub title: TitleAnalysis,
    pub meta_description: DescriptionAnalysis,
    pub metadata_info: MetadataInfo,
    #[serde(rename = "Page Headings summary")]
    pub headings: HeadingsSummary,
    pub word_count: WordCount,
    pub links_summary: LinksSummary,
    pub images_analysis: ImagesAnalysis,
}

/// Whether the audited input names a bare domain or a specific page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputType {
    #[serde(rename = "Domain")]
    Domain,
    #[serde(rename = "URL with path")]
    UrlWithPath,
}

impl InputType {
    /// `Domain` when the path is empty or only slashes.
    pub fn classify(url: &str) -> Self {
        if split_url(url).path.trim_matches('/').is_empty() { InputType::Domain } else { InputType::UrlWithPath }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputInfo {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Input type")]
    pub input_type: InputType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presence {
    #[serde(rename = "Found")]
    Found,
    #[serde(rename = "Not found")]
    NotFound,
}

impl Presence {
    fn of<T>(value: &Option<T>) -> Self {
        if value.is_some() { Presence::Found } else { Presence::NotFound }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleAnalysis {
    pub found: Presence,
    pub data: String,
    pub length: usize,
    pub characters: usize,
    pub words: usize,
    #[serde(rename = "charPerWord")]
    pub char_per_word: f64,
    #[serde(rename = "tag number")]
    pub tag_number: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionAnalysis {
    pub found: Presence,
    pub data: String,
    pub length: usize,
    pub characters: usize,
    pub words: usize,
    #[serde(rename = "charPerWord")]
    pub char_per_word: f64,
    pub number: usize,
}

/// Character, word and characters-per-word figures for a short text.
struct TextStats {
    characters: usize,
    words: usize,
    char_per_word: f64,
}

impl TextStats {
    fn of(text: &str) -> Self {
        let characters = text.chars().count();
        let words = text.split_whitespace().count();
        let char_per_word = if words == 0 { 0.0 } else { round2(characters as f64 / words as f64) };
        Self { characters, words, char_per_word }
    }
}

/// Head metadata; every field is `None` when its tag or attribute is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataInfo {
    pub charset: Option<String>,
    pub canonical: Option<String>,
    pub favicon: Option<String>,
    pub viewport: Option<String>,
    pub keywords: Option<String>,
    pub locale: Option<String>,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
    pub site_name: Option<String>,
    pub site_image: Option<String>,
    pub robots: Option<String>,
    pub hreflangs: Vec<Hreflang>,
}

/// One `<link rel="alternate" hreflang>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hreflang {
    pub language: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingsSummary {
    #[serde(rename = "H1")]
    pub h1: usize,
    #[serde(rename = "H2")]
    pub h2: usize,
    #[serde(rename = "H3")]
    pub h3: usize,
    #[serde(rename = "H4")]
    pub h4: usize,
    #[serde(rename = "H5")]
    pub h5: usize,
    #[serde(rename = "H6")]
    pub h6: usize,
    #[serde(rename = "H1 count")]
    pub h1_count: usize,
    #[serde(rename = "H1 Content")]
    pub h1_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub total: usize,
    #[serde(rename = "Corrected word count")]
    pub corrected: usize,
    #[serde(rename = "Anchor text words")]
    pub anchor_words: usize,
    #[serde(rename = "Anchor Percentage")]
    pub anchor_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinksSummary {
    #[serde(rename = "Total links")]
    pub total: usize,
    #[serde(rename = "External links")]
    pub external: usize,
    #[serde(rename = "Internal")]
    pub internal: usize,
    #[serde(rename = "Nofollow count")]
    pub nofollow: usize,
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagesAnalysis {
    pub summary: ImageSummary,
    pub data: Vec<ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub total: usize,
    #[serde(rename = "No src tag")]
    pub no_src: usize,
    #[serde(rename = "No alt tag")]
    pub no_alt: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub src: String,
    pub alt: String,
}

impl FullReport {
    /// Builds the report from an already fetched page. Performs no I/O.
    ///
    /// `Input` describes the requested URL; `http.using_https` follows the
    /// final URL after redirects.
    pub fn from_page(page: &FetchedPage) -> Result<Self> {
        let doc = Document::parse(&page.body)?;
        let anchors = doc.select("a")?;

        Ok(Self {
            input: InputInfo { url: page.requested_url.clone(), input_type: InputType::classify(&page.requested_url) },
            http: HttpInfo::new(page, &page.final_url),
            title: analyze_title(&doc)?,
            meta_description: analyze_description(&doc)?,
            metadata_info: collect_metadata(&doc)?,
            headings: summarize_headings(&doc)?,
            word_count: count_words(&doc, &anchors),
            links_summary: summarize_links(&anchors),
            images_analysis: analyze_images(&doc)?,
        })
    }
}

fn analyze_title(doc: &Document) -> Result<TitleAnalysis> {
    let title = doc.title().filter(|title| !title.is_empty());
    let found = Presence::of(&title);
    let data = title.unwrap_or_default();
    let stats = TextStats::of(&data);

    Ok(TitleAnalysis {
        found,
        length: stats.characters,
        characters: stats.characters,
        words: stats.words,
        char_per_word: stats.char_per_word,
        tag_number: doc.count("title")?,
        data,
    })
}

fn analyze_description(doc: &Document) -> Result<DescriptionAnalysis> {
    let selector = r#"meta[name="description"]"#;
    let tag = doc.select_first(selector)?;
    let found = Presence::of(&tag);
    let data = tag.and_then(|el| el.attr("content").map(str::to_string)).unwrap_or_default();
    let stats = TextStats::of(&data);

    Ok(DescriptionAnalysis {
        found,
        length: stats.characters,
        characters: stats.characters,
        words: stats.words,
        char_per_word: stats.char_per_word,
        number: doc.count(selector)?,
        data,
    })
}

fn first_attr(doc: &Document, selector: &str, attr: &str) -> Result<Option<String>> {
    Ok(doc
        .select_first(selector)?
        .and_then(|el| el.attr(attr).map(str::to_string)))
}

fn collect_metadata(doc: &Document) -> Result<MetadataInfo> {
    let hreflangs = doc
        .select(r#"link[rel~="alternate"][hreflang]"#)?
        .iter()
        .map(|el| Hreflang {
            language: el.attr("hreflang").unwrap_or_default().to_string(),
            url: el.attr("href").unwrap_or_default().to_string(),
        })
        .collect();

    Ok(MetadataInfo {
        charset: first_attr(doc, "meta[charset]", "charset")?,
        canonical: first_attr(doc, r#"link[rel~="canonical"]"#, "href")?,
        favicon: first_attr(doc, r#"link[rel~="icon"]"#, "href")?,
        viewport: doc.meta_content("name", "viewport"),
        keywords: doc.meta_content("name", "keywords"),
        locale: doc.meta_content("property", "og:locale"),
        content_type: doc.meta_content("property", "og:type"),
        site_name: doc.meta_content("property", "og:site_name"),
        site_image: doc.meta_content("property", "og:image"),
        robots: doc.meta_content("name", "robots"),
        hreflangs,
    })
}

fn summarize_headings(doc: &Document) -> Result<HeadingsSummary> {
    let h1 = doc.count("h1")?;
    Ok(HeadingsSummary {
        h1,
        h2: doc.count("h2")?,
        h3: doc.count("h3")?,
        h4: doc.count("h4")?,
        h5: doc.count("h5")?,
        h6: doc.count("h6")?,
        h1_count: h1,
        h1_content: doc.select_first("h1")?.map(|el| el.text()).unwrap_or_default(),
    })
}

/// Anchor percentage is defined as 0 when the page has no words.
fn count_words(doc: &Document, anchors: &[Element<'_>]) -> WordCount {
    let text = doc.visible_text().to_lowercase();
    let total = WORD_PATTERN.find_iter(&text).count();

    let anchor_words = anchors
        .iter()
        .map(|a| a.text())
        .filter(|text| !text.trim().is_empty())
        .map(|text| text.split_whitespace().count())
        .sum();

    let anchor_percentage = if total == 0 { 0.0 } else { round2(anchor_words as f64 / total as f64 * 100.0) };

    WordCount { total, corrected: total, anchor_words, anchor_percentage }
}

fn summarize_links(anchors: &[Element<'_>]) -> LinksSummary {
    let counts = LinkPolicy::SchemePrefix.tally(anchors.iter().map(|a| a.attr("href")));

    let links = anchors
        .iter()
        .filter_map(|a| {
            let href = a.non_empty_attr("href")?;
            Some(LinkEntry { href: href.to_string(), text: a.text().trim().to_string() })
        })
        .collect();

    LinksSummary {
        total: counts.total,
        external: counts.external,
        internal: counts.internal,
        nofollow: anchors.iter().filter(|a| a.has_token("rel", "nofollow")).count(),
        links,
    }
}

fn analyze_images(doc: &Document) -> Result<ImagesAnalysis> {
    let images = doc.select("img")?;

    let summary = ImageSummary {
        total: images.len(),
        no_src: images.iter().filter(|img| img.non_empty_attr("src").is_none()).count(),
        no_alt: images.iter().filter(|img| img.non_empty_attr("alt").is_none()).count(),
    };

    let data = images
        .iter()
        .map(|img| ImageEntry {
            src: img.attr("src").unwrap_or_default().to_string(),
            alt: img.attr("alt").unwrap_or_default().to_string(),
        })
        .collect();

    Ok(ImagesAnalysis { summary, data })
}

/// Fetches `url` and builds its full report.
///
/// Never fails: errors are logged with their full source chain and come
/// back as [`Report::Error`].
pub async fn full_audit(fetcher: &Fetcher, url: &str) -> Report {
    info!(url, "running full audit");

    let result = match fetcher.fetch(url).await {
        Ok(page) => FullReport::from_page(&page),
        Err(err) => Err(err),
    };

    match &result {
        Ok(report) => debug!(url, status = report.http.status, "full audit complete"),
        Err(err) => error!(url, error = %error_chain(err), "full audit failed"),
    }

    Report::from(result)
}
