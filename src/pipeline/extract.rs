// src/pipeline/extract.rs
// =============================================================================
// This module pulls raw href values out of an HTML page.
//
// We use `lol_html` as a streaming tag scanner. Its handlers fire once per
// <a> start tag exactly as written, with no tree building: an unclosed anchor
// is never reopened by the parser, and a repeated href attribute is kept.
//
// It never fails on bad markup: a truncated or malformed page simply yields
// the anchors that were scanned before the damage.
//
// Output is the raw attribute values, in document order, duplicates included.
// Resolving and de-duplicating happens later in links.rs.
// =============================================================================

use lol_html::{element, HtmlRewriter, Settings};
use tracing::debug;

// Extracts every <a href="..."> value from an HTML byte stream
//
// Parameters:
//   body: the raw response body (decoded as UTF-8, invalid bytes replaced)
//
// Returns: Vec of href values in the order their <a> tags appear. One entry
// per href attribute, so `<a href=1 href=2>` gives two.
//
// Example:
//   body = "<a href='/docs'>Docs</a><link href='/style.css'>"
//   result = ["/docs"]
pub fn extract_hrefs(body: &[u8]) -> Vec<String> {
    let html = String::from_utf8_lossy(body);
    let mut hrefs = Vec::new();

    let outcome = {
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("a[href]", |el| {
                    hrefs.extend(
                        el.attributes()
                            .iter()
                            .filter(|attr| attr.name() == "href")
                            .map(|attr| attr.value()),
                    );
                    Ok(())
                })],
                ..Settings::new()
            },
            |_: &[u8]| {},
        );

        rewriter
            .write(html.as_bytes())
            .and_then(|()| rewriter.end())
    };

    // Our handler never fails, so this only trips on scanner limits
    if let Err(e) = outcome {
        debug!(err = %e, found = hrefs.len(), "html scan stopped early");
    }

    hrefs
}
