// src/pipeline/mod.rs
// =============================================================================
// The fetch-extract pipeline: one URL in, one de-duplicated link list out.
//
//   parse URL -> GET -> parse HTML -> collect <a href> -> normalize -> dedupe
//
// Submodules:
// - fetch: the HTTP collaborator (trait + reqwest implementation)
// - extract: pulls href values out of a page
// - links: normalization and de-duplication
// - error: what can go wrong
// =============================================================================

mod error;
mod extract;
mod fetch;
mod links;

pub use error::{FetchError, VisitError};
pub use extract::extract_hrefs;
pub use fetch::{Fetcher, HttpFetcher, DEFAULT_USER_AGENT};
pub use links::{dedupe, normalize_links, LinkNormalization};

use url::Url;

// Runs the whole pipeline for one URL
//
// Parameters:
//   fetcher: the HTTP collaborator
//   raw_url: the URL exactly as the coordinator handed it out
//   mode: how relative links are made absolute
//
// Returns: every distinct link on the page, in first-seen order
//
// A malformed URL fails here, before the fetcher is ever called.
pub async fn visit(
    fetcher: &dyn Fetcher,
    raw_url: &str,
    mode: LinkNormalization,
) -> Result<Vec<String>, VisitError> {
    let base = Url::parse(raw_url).map_err(|source| VisitError::MalformedUrl {
        url: raw_url.to_string(),
        source,
    })?;

    let body = fetcher
        .fetch(&base)
        .await
        .map_err(|source| VisitError::Fetch {
            url: raw_url.to_string(),
            source,
        })?;

    let hrefs = extract_hrefs(&body);
    let links = normalize_links(&base, raw_url, hrefs, mode);

    Ok(dedupe(links))
}
