//! Scraping of a single listing page and the detail pages of its products.

use std::fmt;

use futures::stream::{self, StreamExt};
use shelfscan_core::ProductRecord;

use crate::error::ScraperError;
use crate::extract::{extract_brand, extract_cards, ProductCard};
use crate::markup::parse_document;
use crate::orchestrator::{CatalogScraper, Concurrency};
use crate::query::CategoryQuery;

/// Why a page or a product was left out of the result.
#[derive(Debug)]
pub enum SkipReason {
    /// The listing page could not be fetched; none of its products are known.
    PageFetch(ScraperError),
    /// The listing page was fetched but has no product container.
    NoProductContainer,
    /// A product card has no link to its detail page.
    MissingProductLink { id: Option<String> },
    /// A product card's link cannot be resolved against the origin.
    InvalidProductLink(ScraperError),
    /// The product detail page could not be fetched.
    DetailFetch(ScraperError),
}

impl SkipReason {
    /// `true` when a whole listing page was lost rather than a single product.
    #[must_use]
    pub fn is_page_level(&self) -> bool {
        matches!(self, SkipReason::PageFetch(_) | SkipReason::NoProductContainer)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PageFetch(e) => write!(f, "listing page fetch failed: {e}"),
            SkipReason::NoProductContainer => write!(f, "no product container on listing page"),
            SkipReason::MissingProductLink { id } => write!(
                f,
                "product card {} has no detail link",
                id.as_deref().unwrap_or("<no id>")
            ),
            SkipReason::InvalidProductLink(e) => write!(f, "{e}"),
            SkipReason::DetailFetch(e) => write!(f, "detail page fetch failed: {e}"),
        }
    }
}

/// A page or product that did not make it into the output.
#[derive(Debug)]
pub struct Skip {
    /// The listing page for page-level skips, the detail page for product skips.
    pub url: String,
    pub reason: SkipReason,
}

/// Result of scraping one listing page.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub records: Vec<ProductRecord>,
    pub skipped: Vec<Skip>,
}

impl PageOutcome {
    fn skipped_page(url: &str, reason: SkipReason) -> Self {
        tracing::warn!(url, %reason, "skipping listing page");
        Self {
            records: Vec::new(),
            skipped: vec![Skip {
                url: url.to_owned(),
                reason,
            }],
        }
    }
}

impl CatalogScraper {
    /// Scrapes one listing page into product records.
    ///
    /// Never fails: a page that cannot be fetched or has no product container
    /// contributes no records, and each product whose detail page cannot be
    /// fetched is dropped on its own while its siblings are kept. Detail pages
    /// are fetched concurrently, so records come back in completion order.
    pub async fn scrape_page(&self, query: &CategoryQuery, page_url: &str) -> PageOutcome {
        let body = match self.client.fetch_page(page_url).await {
            Ok(body) => body,
            Err(e) => return PageOutcome::skipped_page(page_url, SkipReason::PageFetch(e)),
        };

        let cards = {
            let document = parse_document(&body);
            extract_cards(&self.markup, &document)
        };
        let Some(cards) = cards else {
            return PageOutcome::skipped_page(page_url, SkipReason::NoProductContainer);
        };
        tracing::debug!(page_url, cards = cards.len(), "found product cards");

        let width = Concurrency::width(self.concurrency.max_details, cards.len());
        let resolved: Vec<Result<ProductRecord, Skip>> = stream::iter(cards)
            .map(|card| self.resolve_product(query, page_url, card))
            .buffer_unordered(width)
            .collect()
            .await;

        let mut outcome = PageOutcome::default();
        for result in resolved {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(skip) => {
                    tracing::warn!(url = %skip.url, reason = %skip.reason, "skipping product");
                    outcome.skipped.push(skip);
                }
            }
        }
        outcome
    }

    /// Fetches a card's detail page and completes it into a record.
    async fn resolve_product(
        &self,
        query: &CategoryQuery,
        page_url: &str,
        card: ProductCard,
    ) -> Result<ProductRecord, Skip> {
        let Some(href) = card.href.as_deref() else {
            return Err(Skip {
                url: page_url.to_owned(),
                reason: SkipReason::MissingProductLink {
                    id: card.id.clone(),
                },
            });
        };

        let link = query.product_url(href).map_err(|e| Skip {
            url: page_url.to_owned(),
            reason: SkipReason::InvalidProductLink(e),
        })?;

        let body = match self.client.fetch_page(&link).await {
            Ok(body) => body,
            Err(e) => {
                return Err(Skip {
                    url: link,
                    reason: SkipReason::DetailFetch(e),
                })
            }
        };

        let brand = {
            let document = parse_document(&body);
            extract_brand(&self.markup, &document)
        };
        Ok(card.into_record(link, brand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_display_names_card_without_link() {
        let reason = SkipReason::MissingProductLink {
            id: Some("42".to_owned()),
        };
        assert_eq!(reason.to_string(), "product card 42 has no detail link");
    }

    #[test]
    fn skip_reason_display_wraps_fetch_error() {
        let reason = SkipReason::DetailFetch(ScraperError::UnexpectedStatus {
            status: 503,
            url: "https://shop.example.com/p/1".to_owned(),
        });
        assert_eq!(
            reason.to_string(),
            "detail page fetch failed: unexpected HTTP status 503 from https://shop.example.com/p/1"
        );
    }

    #[test]
    fn page_level_reasons() {
        assert!(SkipReason::NoProductContainer.is_page_level());
        assert!(!SkipReason::MissingProductLink { id: None }.is_page_level());
    }

    #[test]
    fn skipped_page_has_no_records() {
        let outcome = PageOutcome::skipped_page(
            "https://shop.example.com/c?page=2",
            SkipReason::NoProductContainer,
        );
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].url, "https://shop.example.com/c?page=2");
    }
}
