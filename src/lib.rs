//! Scrape CS esports results, matches, map stats and player stat lines from
//! hltv.org into typed records.
//!
//! Every page visit is sequential: navigate, wait a fixed settle delay, read
//! the rendered HTML. A [`HltvClient`] owns the [`Session`] doing the
//! navigation for as long as it lives.

mod client;
mod config;
mod error;
pub mod model;
pub mod scraper;
pub mod session;

pub use client::HltvClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SETTLE_DELAY, RESULTS_PAGE_SIZE};
pub use error::{HltvError, Result};
pub use model::*;
pub use session::{HttpSession, Session, StaticSession};

#[cfg(feature = "chrome")]
pub use session::ChromeSession;
