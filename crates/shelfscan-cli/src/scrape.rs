//! Handler for a single category scrape run.
//!
//! Network failures never fail the process: skipped pages and products are
//! logged, and an aborted run (no pagination found) still exits normally with
//! a zero count and no output file.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use shelfscan_core::ProductRecord;
use shelfscan_scraper::{CatalogScraper, CategoryQuery, Skip};

use crate::output;

/// Observational summary printed when a run ends.
#[derive(Debug)]
pub(crate) struct RunSummary {
    pub records: usize,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count: {}", self.records)?;
        write!(f, "time: {:.2} sec", self.elapsed.as_secs_f64())
    }
}

/// Scrapes `category_url` and writes the records to `output_path`.
///
/// # Errors
///
/// Returns an error if the category URL is invalid, the scraper cannot be
/// built, or the output file cannot be written. Fetch failures and a missing
/// pagination control are not errors.
pub(crate) async fn run_scrape(
    config: &shelfscan_core::AppConfig,
    category_url: &str,
    output_path: &Path,
) -> anyhow::Result<RunSummary> {
    let started = Instant::now();

    let query = CategoryQuery::new(category_url)?;
    let scraper = CatalogScraper::from_config(config).context("failed to build catalog scraper")?;

    let records = match scraper.run(&query).await {
        Ok(report) => {
            log_skip_totals(&report.skipped);
            output::write_products(output_path, &report.records)?;
            tracing::info!(
                path = %output_path.display(),
                records = report.records.len(),
                discounted = discounted_count(&report.records),
                "wrote catalog snapshot"
            );
            report.records.len()
        }
        Err(e) => {
            tracing::error!(
                url = query.listing_url(),
                error = %e,
                "run aborted; no output written"
            );
            0
        }
    };

    Ok(RunSummary {
        records,
        elapsed: started.elapsed(),
    })
}

fn discounted_count(records: &[ProductRecord]) -> usize {
    records.iter().filter(|r| r.is_discounted()).count()
}

fn log_skip_totals(skipped: &[Skip]) {
    if skipped.is_empty() {
        return;
    }
    let pages = skipped.iter().filter(|s| s.reason.is_page_level()).count();
    tracing::warn!(
        skipped_pages = pages,
        skipped_products = skipped.len() - pages,
        "run finished with skipped items"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prints_count_and_elapsed_seconds() {
        let summary = RunSummary {
            records: 42,
            elapsed: Duration::from_millis(3_456),
        };
        assert_eq!(summary.to_string(), "count: 42\ntime: 3.46 sec");
    }

    #[test]
    fn discounted_count_counts_records_with_both_prices() {
        let record = |regular: &str, promo: &str| ProductRecord {
            id: None,
            name: "Вода".to_owned(),
            link: "https://shop.example.com/p/1".to_owned(),
            regular_price: regular.to_owned(),
            promo_price: promo.to_owned(),
            brand: None,
        };
        let records = [record("500", "450"), record("300", ""), record("", "99")];
        assert_eq!(discounted_count(&records), 1);
        assert_eq!(discounted_count(&[]), 0);
    }

    #[tokio::test]
    async fn aborted_run_exits_normally_without_output_file() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("data.json");

        let summary = run_scrape(
            &shelfscan_core::AppConfig::default(),
            &format!("{}/category/voda", server.uri()),
            &output_path,
        )
        .await
        .expect("aborted run is not an error");

        assert_eq!(summary.records, 0);
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn completed_run_writes_output_file() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/category/voda"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div id="products-inner"></div><a class="v-pagination__item">1</a>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/category/voda"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div id="products-inner"><div data-sku="5"><a class="product-card-name" href="/p/5"><span class="product-card-name__text">Пять</span></a></div></div>"#,
            ))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/p/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<meta itemprop="brand" content="Пятёрка">"#,
            ))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("data.json");

        let summary = run_scrape(
            &shelfscan_core::AppConfig::default(),
            &format!("{}/category/voda", server.uri()),
            &output_path,
        )
        .await
        .unwrap();

        assert_eq!(summary.records, 1);
        let text = std::fs::read_to_string(&output_path).unwrap();
        assert!(text.contains("\"brand\": \"Пятёрка\""), "got: {text}");
    }

    #[tokio::test]
    async fn invalid_category_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("data.json");

        let result = run_scrape(
            &shelfscan_core::AppConfig::default(),
            "not a url",
            &output_path,
        )
        .await;

        assert!(result.is_err());
        assert!(!output_path.exists());
    }
}
