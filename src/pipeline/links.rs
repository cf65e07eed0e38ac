// src/pipeline/links.rs
// =============================================================================
// This module turns raw href values into the link batch a worker reports.
//
// Two steps:
// 1. Normalize: make relative hrefs absolute against the page URL
// 2. Dedupe: drop repeats, keeping the first occurrence in place
//
// Dedupe only holds within one page. There is no crawl-wide visited set, so
// the same URL can still be reported by many different pages.
// =============================================================================

use clap::ValueEnum;
use std::collections::HashSet;
use url::Url;

// How relative hrefs are turned into absolute links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LinkNormalization {
    /// Resolve relative hrefs against the page URL (handles ../, //host, ?query)
    #[default]
    Resolve,
    /// Glue the page URL string in front of every relative href
    Prefix,
    /// Leave every href exactly as written
    Verbatim,
}

// Normalizes a list of hrefs found on one page
//
// Parameters:
//   base: the parsed page URL
//   base_str: the page URL exactly as it was handed to the worker
//   hrefs: raw attribute values, in document order
//   mode: which normalization to apply
//
// Hrefs that already carry a scheme are never touched, whatever the mode.
pub fn normalize_links(
    base: &Url,
    base_str: &str,
    hrefs: Vec<String>,
    mode: LinkNormalization,
) -> Vec<String> {
    match mode {
        LinkNormalization::Verbatim => hrefs,
        LinkNormalization::Prefix => hrefs
            .into_iter()
            .map(|href| {
                if has_scheme(&href) {
                    href
                } else {
                    format!("{}{}", base_str, href)
                }
            })
            .collect(),
        LinkNormalization::Resolve => hrefs
            .into_iter()
            .map(|href| resolve_link(base, href))
            .collect(),
    }
}

// Resolves one href against the page URL
//
// Examples (base = "https://example.com/docs/intro"):
//   "https://other.com"   -> "https://other.com"  (absolute, kept as written)
//   "/about"              -> "https://example.com/about"
//   "../blog?page=2"      -> "https://example.com/blog?page=2"
//   "//cdn.example.com/x" -> "https://cdn.example.com/x"
fn resolve_link(base: &Url, href: String) -> String {
    if has_scheme(&href) {
        return href;
    }

    match base.join(&href) {
        Ok(url) => url.to_string(),
        // Unresolvable; pass it on and let that worker fail
        Err(_) => href,
    }
}

// True when the href parses as an absolute URL on its own
fn has_scheme(href: &str) -> bool {
    Url::parse(href).is_ok()
}

// Removes duplicate links, keeping the first occurrence of each
//
// Example:
//   ["a", "b", "a", "c", "b"] -> ["a", "b", "c"]
pub fn dedupe(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does dedupe use HashSet::insert inside filter?
//    - insert() returns true only the first time a value goes in
//    - so filter() keeps exactly the first occurrence of each link
//    - the Vec keeps its original order, unlike collecting into a HashSet
//
// 2. Why keep absolute hrefs "as written"?
//    - Url::to_string() would rewrite "http://b.test" as "http://b.test/"
//    - Keeping the author's string means identical hrefs stay identical
//
// 3. What's the difference between Resolve and Prefix?
//    - Prefix: "https://example.com/docs" + "../x" = "https://example.com/docs../x"
//    - Resolve: follows the URL standard, giving "https://example.com/x"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        let links = normalize_links(
            &base,
            "https://example.com/page",
            strings(&["/docs"]),
            LinkNormalization::Resolve,
        );
        assert_eq!(links, strings(&["https://example.com/docs"]));
    }

    #[test]
    fn test_resolve_keeps_absolute_link_as_written() {
        let base = Url::parse("https://example.com").unwrap();
        let links = normalize_links(
            &base,
            "https://example.com",
            strings(&["http://b.test", "mailto:me@example.com"]),
            LinkNormalization::Resolve,
        );
        assert_eq!(links, strings(&["http://b.test", "mailto:me@example.com"]));
    }

    #[test]
    fn test_resolve_dot_segments_and_protocol_relative() {
        let base = Url::parse("https://example.com/docs/intro").unwrap();
        let links = normalize_links(
            &base,
            "https://example.com/docs/intro",
            strings(&["../blog?page=2", "//cdn.example.com/x", "next", "#top"]),
            LinkNormalization::Resolve,
        );
        assert_eq!(
            links,
            strings(&[
                "https://example.com/blog?page=2",
                "https://cdn.example.com/x",
                "https://example.com/docs/next",
                "https://example.com/docs/intro#top",
            ])
        );
    }

    #[test]
    fn test_prefix_concatenates() {
        let base = Url::parse("http://a.test").unwrap();
        let links = normalize_links(
            &base,
            "http://a.test",
            strings(&["/c", "../d", "https://b.test"]),
            LinkNormalization::Prefix,
        );
        assert_eq!(
            links,
            strings(&["http://a.test/c", "http://a.test../d", "https://b.test"])
        );
    }

    #[test]
    fn test_verbatim_leaves_everything() {
        let base = Url::parse("http://a.test").unwrap();
        let links = normalize_links(
            &base,
            "http://a.test",
            strings(&["/c", "d"]),
            LinkNormalization::Verbatim,
        );
        assert_eq!(links, strings(&["/c", "d"]));
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let links = dedupe(strings(&["a", "b", "a", "c", "b"]));
        assert_eq!(links, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = strings(&["x", "y", "x", "z", "z", "y", "w"]);
        let once = dedupe(input.clone());
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);

        // Same set of values as the input
        let before: HashSet<_> = input.into_iter().collect();
        let after: HashSet<_> = once.into_iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
