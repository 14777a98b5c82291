use ::scraper::error::SelectorErrorKind;
use std::num::{ParseFloatError, ParseIntError};

/// All errors that can occur during HLTV scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum HltvError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The browser driver failed to navigate or render a page.
    #[cfg(feature = "chrome")]
    #[error("browser session failed for {url}: {message}")]
    Browser { url: String, message: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a decimal number from scraped text.
    #[error("failed to parse number: {0}")]
    FloatParse(#[from] ParseFloatError),

    /// A URL did not match the path template its id is read from.
    #[error("{url} is not a {kind} url")]
    UrlShape { url: String, kind: &'static str },

    /// A unix timestamp attribute was out of range.
    #[error("invalid unix timestamp: {0}")]
    InvalidTimestamp(String),

    /// A side label other than T, CT or Both.
    #[error("unknown side label: {0:?}")]
    UnknownSide(String),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for HltvError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        HltvError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HltvError>;
