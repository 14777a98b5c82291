use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use super::Session;
use crate::error::{HltvError, Result};

/// Session serving pages from memory, keyed by URL.
///
/// Useful for re-parsing saved pages offline. Unknown URLs fail with a
/// 404 status, like a missing page would.
#[derive(Debug, Default, Clone)]
pub struct StaticSession {
    pages: HashMap<String, String>,
    current: Option<String>,
    visited: Vec<String>,
}

impl StaticSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `html` as the page served for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs navigated to so far, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

#[async_trait]
impl Session for StaticSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "serving stored page");
        self.visited.push(url.to_owned());
        match self.pages.get(url) {
            Some(html) => {
                self.current = Some(html.clone());
                Ok(())
            }
            None => Err(HltvError::UnexpectedStatus {
                url: url.to_owned(),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn page_source(&mut self) -> Result<String> {
        self.current.clone().ok_or(HltvError::ElementNotFound {
            context: "page source (no page loaded)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let mut session = StaticSession::new().with_page("https://x/a", "<p>a</p>");
        session.navigate("https://x/a").await.unwrap();
        assert_eq!(session.page_source().await.unwrap(), "<p>a</p>");

        let missing = session.navigate("https://x/b").await;
        assert!(matches!(
            missing,
            Err(HltvError::UnexpectedStatus { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
        ));
        assert_eq!(session.visited(), ["https://x/a", "https://x/b"]);
    }

    #[tokio::test]
    async fn test_page_source_before_navigation_fails() {
        let mut session = StaticSession::new();
        assert!(session.page_source().await.is_err());
    }
}
