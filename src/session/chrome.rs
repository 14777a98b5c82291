use std::ffi::OsStr;
use std::sync::Arc;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info};

use super::Session;
use crate::error::{HltvError, Result};

/// Session driving a headless Chrome tab.
///
/// The browser process is shut down when the session is dropped.
pub struct ChromeSession {
    // Kept alive for the tab; dropping it kills the process.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch a headless Chrome and open one tab.
    pub fn launch() -> Result<Self> {
        info!("launching headless chrome");
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| browser_error("<launch>", e))?;
        let browser = Browser::new(options).map_err(|e| browser_error("<launch>", e))?;
        let tab = browser.new_tab().map_err(|e| browser_error("<launch>", e))?;
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

fn browser_error(url: &str, err: impl std::fmt::Display) -> HltvError {
    HltvError::Browser {
        url: url.to_owned(),
        message: err.to_string(),
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating tab");
        let tab = Arc::clone(&self.tab);
        let target = url.to_owned();
        tokio::task::spawn_blocking(move || {
            tab.navigate_to(&target)
                .and_then(|tab| tab.wait_until_navigated())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| browser_error(url, e))?
        .map_err(|e| browser_error(url, e))
    }

    async fn page_source(&mut self) -> Result<String> {
        let tab = Arc::clone(&self.tab);
        let url = tab.get_url();
        tokio::task::spawn_blocking(move || tab.get_content())
            .await
            .map_err(|e| browser_error(&url, e))?
            .map_err(|e| browser_error(&url, e))
    }

    async fn close(&mut self) -> Result<()> {
        let tab = Arc::clone(&self.tab);
        tokio::task::spawn_blocking(move || tab.close(true))
            .await
            .map_err(|e| browser_error("<close>", e))?
            .map_err(|e| browser_error("<close>", e))?;
        Ok(())
    }
}
