//! The category being scraped and the URLs derived from it.

use reqwest::Url;

use crate::error::ScraperError;

/// Query parameter restricting the listing to items currently in stock.
const IN_STOCK_PARAM: (&str, &str) = ("in_stock", "1");
const PAGE_PARAM: &str = "page";

/// Immutable description of one category scrape.
///
/// Holds the listing URL with the in-stock filter applied and the origin
/// (scheme + host) that relative product links are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    listing_url: Url,
    origin: Url,
}

impl CategoryQuery {
    /// Builds a query for `category_url` with the filter forced to
    /// `in_stock=1`. Any `in_stock` value already in the URL is replaced;
    /// other parameters keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidCategoryUrl`] if the URL does not parse
    /// or is not `http`/`https`.
    pub fn new(category_url: &str) -> Result<Self, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidCategoryUrl {
            url: category_url.to_owned(),
            reason,
        };

        let mut listing_url = Url::parse(category_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(listing_url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme \"{}\"",
                listing_url.scheme()
            )));
        }

        let kept: Vec<(String, String)> = listing_url
            .query_pairs()
            .filter(|(key, _)| key != IN_STOCK_PARAM.0)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        listing_url.set_query(None);
        listing_url
            .query_pairs_mut()
            .extend_pairs(&kept)
            .append_pair(IN_STOCK_PARAM.0, IN_STOCK_PARAM.1);

        let origin = Url::parse(&listing_url.origin().ascii_serialization())
            .map_err(|e| invalid(format!("origin is not a valid URL base: {e}")))?;

        Ok(Self {
            listing_url,
            origin,
        })
    }

    /// The filtered listing URL without a page number; pagination discovery
    /// fetches this.
    #[must_use]
    pub fn listing_url(&self) -> &str {
        self.listing_url.as_str()
    }

    /// Scheme and host of the category, without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.origin.as_str().trim_end_matches('/')
    }

    /// URL of listing page `page` (1-indexed).
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.listing_url.clone();
        url.query_pairs_mut()
            .append_pair(PAGE_PARAM, &page.to_string());
        url.into()
    }

    /// Resolves a product card's `href` into an absolute detail-page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProductLink`] if `href` cannot be joined
    /// onto the origin.
    pub fn product_url(&self, href: &str) -> Result<String, ScraperError> {
        self.origin
            .join(href)
            .map(String::from)
            .map_err(|e| ScraperError::InvalidProductLink {
                href: href.to_owned(),
                reason: e.to_string(),
            })
    }
}
