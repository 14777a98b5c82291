use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::*;
use crate::scraper;
use crate::session::{HttpSession, Session};

/// The main entry point for scraping HLTV.
///
/// `HltvClient` owns one [`Session`] for its whole lifetime and uses it for
/// every page it visits, one navigation at a time. The session is released by
/// [`HltvClient::close`] or, failing that, when the client is dropped.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> hltv_scraper::Result<()> {
/// use hltv_scraper::HltvClient;
///
/// let mut client = HltvClient::new();
/// let results = client.get_results(0, 100).await?;
/// for result in &results {
///     let m = client.get_match(&result.match_url).await?;
///     println!("{m}");
/// }
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct HltvClient<S: Session = HttpSession> {
    session: S,
    config: ClientConfig,
}

impl HltvClient<HttpSession> {
    /// Create a new HTTP-backed client with default settings.
    pub fn new() -> Self {
        Self::with_session(HttpSession::new(), ClientConfig::default())
    }
}

impl Default for HltvClient<HttpSession> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Session> HltvClient<S> {
    /// Create a client that drives the given session.
    pub fn with_session(session: S, config: ClientConfig) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Fetch the results listing from `offset_start` up to and including
    /// `offset_end`, one page of 100 results at a time.
    #[instrument(skip(self))]
    pub async fn get_results(
        &mut self,
        offset_start: u32,
        offset_end: u32,
    ) -> Result<Vec<MatchResult>> {
        scraper::results::get_results(&mut self.session, &self.config, offset_start, offset_end)
            .await
    }

    /// Fetch a match page, and its map stats pages unless disabled in the config.
    #[instrument(skip(self))]
    pub async fn get_match(&mut self, url: &str) -> Result<Match> {
        scraper::match_detail::get_match(&mut self.session, &self.config, url).await
    }

    /// Fetch a single map stats page. The parent match id is read from the
    /// page when not given.
    #[instrument(skip(self))]
    pub async fn get_match_map(&mut self, url: &str, match_id: Option<u32>) -> Result<MatchMap> {
        scraper::match_map::get_match_map(&mut self.session, &self.config, url, match_id).await
    }

    /// Release the session.
    pub async fn close(mut self) -> Result<()> {
        debug!("closing session");
        self.session.close().await
    }
}
