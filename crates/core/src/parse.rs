//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types the report
//! builders query. Every lookup is tolerant of absence: a missing tag yields
//! `None` or an empty list, never an error.
//!
//! # Example
//!
//! ```rust
//! use seo_auditor_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><meta name="description" content="About us"></head>
//!         <body><h1>Title</h1><p class="content">Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.meta_content("name", "description"), Some("About us".to_string()));
//! assert_eq!(doc.count("p.content").unwrap(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{AuditError, Result};

/// Elements whose text never counts as visible page text.
const NON_VISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use seo_auditor_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// The parser is lenient: malformed markup is repaired the way browsers
    /// repair it, so this only fails for conditions outside the markup itself.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seo_auditor_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Counts the elements matching a CSS selector.
    pub fn count(&self, selector: &str) -> Result<usize> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).count())
    }

    /// Gets the text of the first `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets the `content` attribute of the first `<meta>` whose `attr` equals `value`.
    ///
    /// `meta_content("name", "robots")` reads `<meta name="robots" content="...">`,
    /// `meta_content("property", "og:image")` reads Open Graph tags.
    pub fn meta_content(&self, attr: &str, value: &str) -> Option<String> {
        let selector = format!("meta[{attr}=\"{value}\"]");
        self.select_first(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.attr("content").map(str::to_string))
    }

    /// Gets every non-blank text node outside script/style/template, trimmed.
    ///
    /// Comments are never included.
    pub fn visible_strings(&self) -> Vec<String> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| NON_VISIBLE_ELEMENTS.contains(&el.name()))
                });
                let trimmed = text.trim();
                (!hidden && !trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }

    /// Gets the visible text of the document with one space between text nodes.
    pub fn visible_text(&self) -> String {
        self.visible_strings().join(" ")
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AuditError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use seo_auditor_core::parse::Document;
///
/// let html = r#"<a href="https://example.com" rel="nofollow noopener">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// assert!(link.has_token("rel", "nofollow"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, `None` if it is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the value of an attribute, treating an empty value as absent.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// Whether a whitespace-separated attribute (like `rel`) contains `token`.
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.split_ascii_whitespace().any(|t| t == token))
    }
}
