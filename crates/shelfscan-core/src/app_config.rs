/// Browser-identifying `User-Agent` sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:88.0) Gecko/20100101 Firefox/88.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Ceiling on listing pages scraped at once; `0` leaves the fan-out uncapped.
    pub max_concurrent_pages: usize,
    /// Ceiling on detail-page fetches in flight per listing page; `0` is uncapped.
    pub max_concurrent_details: usize,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_concurrent_pages: 0,
            max_concurrent_details: 0,
            max_retries: 0,
            retry_backoff_base_secs: 1,
        }
    }
}
