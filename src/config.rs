use std::time::Duration;

/// Site root every listing URL and relative link is resolved against.
pub const DEFAULT_BASE_URL: &str = "https://www.hltv.org";

/// How long a page is given to render after each navigation.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Number of results on one page of the results listing.
pub const RESULTS_PAGE_SIZE: u32 = 100;

/// Settings for [`HltvClient`](crate::HltvClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub settle_delay: Duration,
    /// Also visit every map stats page when scraping a match.
    pub fetch_match_maps: bool,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_match_maps(mut self, fetch_match_maps: bool) -> Self {
        self.fetch_match_maps = fetch_match_maps;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            fetch_match_maps: true,
        }
    }
}
