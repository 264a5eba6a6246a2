use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid category URL \"{url}\": {reason}")]
    InvalidCategoryUrl { url: String, reason: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no pagination controls found on {url}")]
    NoPaginationFound { url: String },

    #[error("last pagination control on {url} is not a page number: \"{label}\"")]
    InvalidPaginationLabel { url: String, label: String },

    #[error("cannot build product link from \"{href}\": {reason}")]
    InvalidProductLink { href: String, reason: String },
}
