//! Run-level orchestration: discover the page count, scrape every listing
//! page concurrently, and merge the per-page results.

use futures::stream::{self, StreamExt};
use shelfscan_core::{AppConfig, ProductRecord};

use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::markup::{Markup, MarkupRules};
use crate::query::CategoryQuery;
use crate::scrape::Skip;

/// Concurrency ceilings for the two fan-out stages.
///
/// `0` means uncapped: every page (or every detail fetch of a page) is in
/// flight at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Concurrency {
    pub max_pages: usize,
    pub max_details: usize,
}

impl Concurrency {
    /// Effective `buffer_unordered` width for `tasks` futures under `ceiling`.
    pub(crate) fn width(ceiling: usize, tasks: usize) -> usize {
        if ceiling == 0 {
            tasks.max(1)
        } else {
            ceiling
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// Page count reported by pagination discovery.
    pub page_count: u32,
    /// Records in completion order, not page order.
    pub records: Vec<ProductRecord>,
    /// Pages and products dropped along the way, with the reason.
    pub skipped: Vec<Skip>,
}

/// Scrapes a paginated category listing into [`ProductRecord`]s.
pub struct CatalogScraper {
    pub(crate) client: CatalogClient,
    pub(crate) markup: Markup,
    pub(crate) concurrency: Concurrency,
}

impl CatalogScraper {
    #[must_use]
    pub fn new(client: CatalogClient, markup: Markup, concurrency: Concurrency) -> Self {
        Self {
            client,
            markup,
            concurrency,
        }
    }

    /// Builds a scraper with the default selector table and the client and
    /// concurrency settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built, or
    /// [`ScraperError::InvalidSelector`] if the selector table does not compile.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            CatalogClient::from_config(config)?,
            Markup::compile(&MarkupRules::default())?,
            Concurrency {
                max_pages: config.max_concurrent_pages,
                max_details: config.max_concurrent_details,
            },
        ))
    }

    /// Scrapes every listing page of `query`.
    ///
    /// Page and product failures never fail the run; they are collected in
    /// [`ScrapeReport::skipped`].
    ///
    /// # Errors
    ///
    /// Returns the pagination discovery error ([`ScraperError::NoPaginationFound`],
    /// [`ScraperError::InvalidPaginationLabel`], or the fetch failure of the
    /// first page). The run is aborted and no page is scraped.
    pub async fn run(&self, query: &CategoryQuery) -> Result<ScrapeReport, ScraperError> {
        let page_count = match self.discover_page_count(query.listing_url()).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    url = query.listing_url(),
                    error = %e,
                    "pagination discovery failed; aborting run"
                );
                return Err(e);
            }
        };
        tracing::info!(page_count, url = query.listing_url(), "discovered listing pages");

        let page_urls: Vec<String> = (1..=page_count).map(|page| query.page_url(page)).collect();
        let width = Concurrency::width(self.concurrency.max_pages, page_urls.len());

        let mut outcomes = stream::iter(page_urls)
            .map(|url| async move { self.scrape_page(query, &url).await })
            .buffer_unordered(width);

        let mut report = ScrapeReport {
            page_count,
            ..ScrapeReport::default()
        };
        while let Some(outcome) = outcomes.next().await {
            report.records.extend(outcome.records);
            report.skipped.extend(outcome.skipped);
        }

        tracing::info!(
            page_count,
            records = report.records.len(),
            skipped = report.skipped.len(),
            "category scrape finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_uncapped_matches_task_count() {
        assert_eq!(Concurrency::width(0, 12), 12);
    }

    #[test]
    fn width_uncapped_is_never_zero() {
        assert_eq!(Concurrency::width(0, 0), 1);
    }

    #[test]
    fn width_uses_ceiling_when_set() {
        assert_eq!(Concurrency::width(4, 12), 4);
        assert_eq!(Concurrency::width(4, 2), 4);
    }

    #[test]
    fn from_config_copies_ceilings() {
        let config = AppConfig {
            max_concurrent_pages: 3,
            max_concurrent_details: 8,
            ..AppConfig::default()
        };
        let scraper = CatalogScraper::from_config(&config).unwrap();
        assert_eq!(
            scraper.concurrency,
            Concurrency {
                max_pages: 3,
                max_details: 8
            }
        );
    }
}
