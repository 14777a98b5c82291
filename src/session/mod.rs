//! Page sources the scraper reads rendered HTML from.
//!
//! A [`Session`] behaves like a single browser tab: [`Session::navigate`]
//! loads a page, and [`Session::page_source`] returns whatever is rendered at
//! the moment it is called. The scraper waits a fixed settle delay between the
//! two calls and never polls for readiness.

#[cfg(feature = "chrome")]
mod chrome;
mod http;
mod fixture;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(feature = "chrome")]
pub use chrome::ChromeSession;
pub use fixture::StaticSession;
pub use http::HttpSession;

/// A single-tab page source, used one navigation at a time.
#[async_trait]
pub trait Session: Send {
    /// Load `url`, replacing the current page.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// HTML of the page as currently rendered.
    async fn page_source(&mut self) -> Result<String>;

    /// Release the underlying driver. Dropping the session releases it too.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
