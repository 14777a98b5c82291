use async_trait::async_trait;
use tracing::debug;

use super::Session;
use crate::error::{HltvError, Result};

/// Session backed by plain HTTP requests.
///
/// Pages are served as sent by the server, without running any scripts.
pub struct HttpSession {
    http: reqwest::Client,
    current: Option<String>,
}

impl HttpSession {
    /// Create a new session with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new session using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            current: None,
        }
    }
}

impl Default for HttpSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "fetching page");

        let response = self.http.get(url).send().await.map_err(|e| HltvError::Http {
            url: url.to_owned(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HltvError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| HltvError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

        self.current = Some(body);
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        self.current.clone().ok_or(HltvError::ElementNotFound {
            context: "page source (no page loaded)",
        })
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}
