mod output;
mod scrape;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfscan")]
#[command(about = "Scrape a paginated category listing into a JSON catalog snapshot")]
struct Cli {
    /// Category listing URL; the in-stock filter is appended automatically.
    category_url: String,

    /// File the JSON product array is written to.
    #[arg(short, long, default_value = "data.json")]
    output: PathBuf,

    /// Listing pages scraped at once (0 = uncapped). Overrides `SHELFSCAN_MAX_CONCURRENT_PAGES`.
    #[arg(long)]
    max_concurrent_pages: Option<usize>,

    /// Detail pages fetched at once per listing page (0 = uncapped).
    /// Overrides `SHELFSCAN_MAX_CONCURRENT_DETAILS`.
    #[arg(long)]
    max_concurrent_details: Option<usize>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut shelfscan_core::AppConfig) {
        if let Some(pages) = self.max_concurrent_pages {
            config.max_concurrent_pages = pages;
        }
        if let Some(details) = self.max_concurrent_details {
            config.max_concurrent_details = details;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = shelfscan_core::load_app_config()?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let summary = scrape::run_scrape(&config, &cli.category_url, &cli.output).await?;
    println!("{summary}");

    Ok(())
}
