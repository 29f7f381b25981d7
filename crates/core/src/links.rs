//! Link classification strategies and lenient URL splitting.
//!
//! Two strategies decide whether an anchor points off-site, and they do not
//! always agree:
//!
//! * [`LinkPolicy::HostComponent`] splits the `href` and calls it external when
//!   a network-location component is present (`https://host/...`, `//host/...`).
//!   The basic report uses it.
//! * [`LinkPolicy::SchemePrefix`] only checks whether the `href` text starts
//!   with `http`. The full report uses it.
//!
//! A protocol-relative `//cdn.example.com/app.js` is external under the first
//! and internal under the second; `httpdocs/index.html` is the reverse.

use serde::Serialize;

/// Which rule decides that a link is external.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// External when the href has a non-empty network-location component.
    HostComponent,
    /// External when the href literally starts with `http`.
    SchemePrefix,
}

impl LinkPolicy {
    /// Classifies one `href`. A missing `href` is internal under both policies.
    pub fn is_external(self, href: Option<&str>) -> bool {
        let href = href.unwrap_or_default();
        match self {
            LinkPolicy::HostComponent => !split_url(href).netloc.is_empty(),
            LinkPolicy::SchemePrefix => href.starts_with("http"),
        }
    }

    /// Counts a sequence of hrefs into total/internal/external.
    pub fn tally<'a, I>(self, hrefs: I) -> LinkCounts
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts = LinkCounts::default();
        for href in hrefs {
            counts.total += 1;
            if self.is_external(href) {
                counts.external += 1;
            } else {
                counts.internal += 1;
            }
        }
        counts
    }
}

/// Link totals; `internal + external == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkCounts {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

/// The five generic components of a URL reference, borrowed from the input.
///
/// Unlike [`url::Url`] this accepts relative references and never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Splits a URL reference into scheme, network location, path, query and fragment.
///
/// Leading and trailing control characters and spaces are ignored. A scheme is
/// only recognized when it starts with an ASCII letter and contains nothing but
/// letters, digits, `+`, `-` and `.`.
pub fn split_url(input: &str) -> UrlParts<'_> {
    let mut rest = input.trim_matches(|c: char| c <= ' ');
    let mut parts = UrlParts::default();

    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        let valid = candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            parts.scheme = candidate;
            rest = &rest[colon + 1..];
        }
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let end = after_slashes.find(['/', '?', '#']).unwrap_or(after_slashes.len());
        parts.netloc = &after_slashes[..end];
        rest = &after_slashes[end..];
    }

    if let Some(hash) = rest.find('#') {
        parts.fragment = &rest[hash + 1..];
        rest = &rest[..hash];
    }

    if let Some(question) = rest.find('?') {
        parts.query = &rest[question + 1..];
        rest = &rest[..question];
    }

    parts.path = rest;
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_split_absolute_url() {
        let parts = split_url("https://example.com/blog/post?id=3#top");
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.netloc, "example.com");
        assert_eq!(parts.path, "/blog/post");
        assert_eq!(parts.query, "id=3");
        assert_eq!(parts.fragment, "top");
    }

    #[test]
    fn test_split_relative_reference() {
        let parts = split_url("/about?x=1");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "/about");
        assert_eq!(parts.query, "x=1");
    }

    #[test]
    fn test_split_protocol_relative() {
        let parts = split_url("//cdn.example.com/app.js");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "cdn.example.com");
        assert_eq!(parts.path, "/app.js");
    }

    #[test]
    fn test_split_opaque_scheme() {
        let parts = split_url("mailto:team@example.com");
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "team@example.com");
    }

    #[test]
    fn test_split_invalid_scheme_is_path() {
        let parts = split_url("1http:thing");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.path, "1http:thing");
    }

    #[rstest]
    #[case("https://other.com/page", true, true)]
    #[case("http://other.com", true, true)]
    #[case("/about", false, false)]
    #[case("#section", false, false)]
    #[case("", false, false)]
    #[case("//cdn.example.com/app.js", true, false)]
    #[case("httpdocs/index.html", false, true)]
    #[case("mailto:team@example.com", false, false)]
    #[case("  https://padded.com ", true, false)]
    fn test_policies(#[case] href: &str, #[case] host_component: bool, #[case] scheme_prefix: bool) {
        assert_eq!(LinkPolicy::HostComponent.is_external(Some(href)), host_component);
        assert_eq!(LinkPolicy::SchemePrefix.is_external(Some(href)), scheme_prefix);
    }

    #[test]
    fn test_missing_href_is_internal() {
        assert!(!LinkPolicy::HostComponent.is_external(None));
        assert!(!LinkPolicy::SchemePrefix.is_external(None));
    }

    #[test]
    fn test_tally_sums_to_total() {
        let hrefs = [Some("/a"), Some("https://b.com"), None, Some("//c.com"), Some("httpx")];

        for policy in [LinkPolicy::HostComponent, LinkPolicy::SchemePrefix] {
            let counts = policy.tally(hrefs);
            assert_eq!(counts.total, 5);
            assert_eq!(counts.internal + counts.external, counts.total);
        }

        assert_eq!(LinkPolicy::HostComponent.tally(hrefs).external, 2);
        assert_eq!(LinkPolicy::SchemePrefix.tally(hrefs).external, 2);
    }
}
