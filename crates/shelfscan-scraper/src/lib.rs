pub mod client;
pub mod error;
pub mod extract;
pub mod markup;
pub mod orchestrator;
pub mod pagination;
pub mod query;
pub mod scrape;

mod rate_limit;

pub use client::CatalogClient;
pub use error::ScraperError;
pub use markup::{Extract, FieldRule, Markup, MarkupRules};
pub use orchestrator::{CatalogScraper, Concurrency, ScrapeReport};
pub use query::CategoryQuery;
pub use scrape::{PageOutcome, Skip, SkipReason};
