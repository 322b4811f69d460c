//! Listing page parser
//!
//! Extracts job stubs (title + absolute detail URL) from the repeated job
//! cards on the listing page.

use crate::crawler::dom::{element_text, DomQuery, Selectors};
use crate::record::JobStub;
use crate::{NoDataReason, ScrapeError};
use scraper::Html;
use url::Url;

/// Result of parsing the listing page
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Stubs in card order
    pub stubs: Vec<JobStub>,

    /// Number of cards matched by the card selector
    pub cards_found: usize,

    /// Cards dropped for lacking a title or link
    pub skipped: usize,
}

/// Parses the listing page into job stubs
///
/// A card whose title link is missing, has empty text, or has an empty or
/// unresolvable `href` is skipped with a warning. Relative links are
/// resolved against `base_url`.
///
/// # Returns
///
/// * `Ok(Listing)` - At least one card was found (stubs may still be empty)
/// * `Err(ScrapeError::NoData(NoDataReason::NoCards))` - No card matched
///
/// # Example
///
/// ```
/// use jobscrape::config::SelectorConfig;
/// use jobscrape::crawler::{parse_listing, Selectors};
/// use url::Url;
///
/// let html = r#"<div class="internship_meta experience_meta">
///     <a class="job-title-href" href="/job/detail/1">Backend Intern</a>
/// </div>"#;
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let base = Url::parse("https://example.com").unwrap();
///
/// let listing = parse_listing(html, &selectors, &base).unwrap();
/// assert_eq!(listing.stubs[0].url, "https://example.com/job/detail/1");
/// ```
pub fn parse_listing(
    body: &str,
    selectors: &Selectors,
    base_url: &Url,
) -> Result<Listing, ScrapeError> {
    let document = Html::parse_document(body);
    let cards = document.find_all(&selectors.card);

    if cards.is_empty() {
        return Err(ScrapeError::NoData(NoDataReason::NoCards));
    }

    let mut listing = Listing {
        cards_found: cards.len(),
        ..Listing::default()
    };

    for (index, card) in cards.iter().enumerate() {
        let stub = card.find_first(&selectors.title_link).and_then(|link| {
            let title = element_text(&link);
            let href = link.value().attr("href")?;
            if title.is_empty() {
                return None;
            }
            let url = resolve_href(href, base_url)?;
            Some(JobStub { title, url })
        });

        match stub {
            Some(stub) => listing.stubs.push(stub),
            None => {
                tracing::warn!(
                    "Job card {} skipped due to missing title or URL",
                    index + 1
                );
                listing.skipped += 1;
            }
        }
    }

    Ok(listing)
}

/// Resolves a card link against the site origin
///
/// Returns None for empty, fragment-only or non-HTTP(S) links.
fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}
