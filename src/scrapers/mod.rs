//! Scrapers for the calendar, event-detail and news endpoints.
//!
//! Every operation follows the same two-phase pattern:
//!
//! 1. **Fetching**: pull one document (or a batch of them) through [`FetchText`]
//! 2. **Parsing**: turn the markup or JSON into the records in [`crate::models`]
//!
//! The parsing halves are plain synchronous functions over already-fetched
//! text, so they are tested without any network.
//!
//! # Endpoints
//!
//! | Operation | Module | Path | Format |
//! |-----------|--------|------|--------|
//! | Server timezone | [`calendar`] | `/calendar` | HTML |
//! | Calendar window | [`calendar`] | `/calendar?range=jan5.2025-jan11.2025` | HTML |
//! | Event detail | [`detail`] | `/calendar/details/1-<eventId>` | JSON |
//! | Articles | [`news`] | `/news`, then each article page | HTML |

pub mod calendar;
pub mod detail;
pub mod news;

use crate::client::FetchText;
use crate::error::{CalendarError, Result};
use scraper::{ElementRef, Selector};
use url::Url;

/// Entry point for every scraping operation against one origin.
#[derive(Debug, Clone)]
pub struct Scraper<F> {
    fetcher: F,
    base_url: Url,
}

impl<F: FetchText> Scraper<F> {
    pub fn new(fetcher: F, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CalendarError::Config(format!("invalid base url {base_url}: {e}")))?;
        Ok(Self { fetcher, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path (optionally with query) against the base URL.
    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CalendarError::Config(format!("cannot resolve {path}: {e}")))
    }

    /// Fetch a URL and insist on a 2xx answer.
    async fn fetch_body(&self, url: &str) -> Result<String> {
        self.fetcher.fetch_text(url).await?.into_success_body(url)
    }
}

/// Parse a selector that is a compile-time literal in this crate.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// All descendant text of an element, whitespace-collapsed and trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
