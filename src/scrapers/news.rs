//! News listing and article scraping.
//!
//! The listing page links articles with relative URLs like
//! `/news/1320001-us-jobs-report-beats-estimates`. Those are resolved to
//! absolute URLs, then every article page is fetched through the bounded
//! batch fetcher so the origin never sees more than `batch_size` requests
//! at once.

use super::{Scraper, element_text, selector};
use crate::batch::fetch_in_batches;
use crate::client::FetchText;
use crate::error::Result;
use crate::models::Article;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

static ARTICLE_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/news/\d+").expect("valid article href regex"));

/// Extract unique absolute article URLs from the listing page, in page order.
pub fn parse_article_urls(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&selector("a[href]"))
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| ARTICLE_HREF_RE.is_match(href))
        .filter_map(|href| base_url.join(href).ok())
        .map(|url| url.to_string())
        .unique()
        .collect()
}

/// Parse one article page.
pub fn parse_article(url: &str, html: &str) -> Article {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("h1"))
        .next()
        .or_else(|| document.select(&selector("title")).next())
        .map(element_text)
        .unwrap_or_default();

    let mut paragraphs: Vec<String> = document
        .select(&selector("article p"))
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() {
        paragraphs = document
            .select(&selector("p"))
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect();
    }

    let content = paragraphs.join("\n");
    debug!(%url, bytes = content.len(), "Parsed article");
    Article {
        url: url.to_string(),
        title,
        content,
    }
}

impl<F: FetchText> Scraper<F> {
    /// Article URLs linked from the news listing.
    #[instrument(level = "info", skip_all)]
    pub async fn index_articles(&self) -> Result<Vec<String>> {
        let url = self.url_for("/news")?;
        let html = self.fetch_body(url.as_str()).await?;
        let urls = parse_article_urls(&html, self.base_url());
        info!(count = urls.len(), source = %url, "Indexed article URLs");
        Ok(urls)
    }

    /// Fetch every listed article, `batch_size` at a time with
    /// `batch_delay_ms` between batches.
    ///
    /// Any failing article fetch fails the whole call.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_articles(&self, batch_size: usize, batch_delay_ms: u64) -> Result<Vec<Article>> {
        let urls = self.index_articles().await?;
        let articles = fetch_in_batches(
            &urls,
            batch_size,
            Duration::from_millis(batch_delay_ms),
            |url| async move {
                let body = self.fetch_body(&url).await?;
                Ok(parse_article(&url, &body))
            },
        )
        .await?;

        info!(count = articles.len(), "Fetched article contents");
        Ok(articles)
    }
}
