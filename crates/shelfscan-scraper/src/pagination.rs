//! Page-count discovery from the pagination controls of the first listing page.

use crate::error::ScraperError;
use crate::extract::pagination_labels;
use crate::markup::parse_document;
use crate::orchestrator::CatalogScraper;

impl CatalogScraper {
    /// Fetches `listing_url` once and returns the total number of listing pages.
    ///
    /// # Errors
    ///
    /// - Any fetch error for the listing page.
    /// - [`ScraperError::NoPaginationFound`] when the page has no pagination
    ///   controls. This is never treated as a single-page listing.
    /// - [`ScraperError::InvalidPaginationLabel`] when the last control is not
    ///   a positive page number.
    pub async fn discover_page_count(&self, listing_url: &str) -> Result<u32, ScraperError> {
        let body = self.client.fetch_page(listing_url).await?;
        let labels = {
            let document = parse_document(&body);
            pagination_labels(&self.markup, &document)
        };
        tracing::debug!(listing_url, controls = labels.len(), "read pagination controls");
        page_count_from_labels(listing_url, &labels)
    }
}

/// Interprets the label of the last pagination control as the page count.
///
/// # Errors
///
/// See [`CatalogScraper::discover_page_count`].
pub fn page_count_from_labels(url: &str, labels: &[String]) -> Result<u32, ScraperError> {
    let last = labels.last().ok_or_else(|| ScraperError::NoPaginationFound {
        url: url.to_owned(),
    })?;

    match last.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ScraperError::InvalidPaginationLabel {
            url: url.to_owned(),
            label: last.clone(),
        }),
    }
}
