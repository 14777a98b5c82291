pub mod ids;
pub(crate) mod match_detail;
pub(crate) mod match_map;
pub(crate) mod match_map_player;
pub(crate) mod results;

use std::time::Duration;

use ::scraper::{ElementRef, Html, Selector};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{HltvError, Result};
use crate::session::Session;

/// Navigate to `url`, wait `settle_delay`, then parse whatever is rendered.
pub(crate) async fn load_page<S: Session + ?Sized>(
    session: &mut S,
    url: &str,
    settle_delay: Duration,
) -> Result<Html> {
    session.navigate(url).await?;
    debug!(url, ?settle_delay, "waiting for page to settle");
    tokio::time::sleep(settle_delay).await;
    let source = session.page_source().await?;
    Ok(Html::parse_document(&source))
}

/// First element matching `selector` inside `element`.
pub(crate) fn select_first<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or(HltvError::ElementNotFound { context })
}

/// The `n`-th (zero-based) element matching `selector` inside `element`.
pub(crate) fn select_nth<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
    n: usize,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .nth(n)
        .ok_or(HltvError::ElementNotFound { context })
}

/// Value of attribute `name` on `element`.
pub(crate) fn attr<'a>(
    element: &ElementRef<'a>,
    name: &str,
    context: &'static str,
) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or(HltvError::ElementNotFound { context })
}

/// Text content of `element` with runs of whitespace collapsed to one space.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract collapsed text from the first element matching `selector`
/// inside `element`.
pub(crate) fn select_text(
    element: &ElementRef,
    selector: &Selector,
    context: &'static str,
) -> Result<String> {
    select_first(element, selector, context).map(|e| element_text(&e))
}

/// Parse an integer out of scraped text, ignoring surrounding whitespace.
pub(crate) fn parse_number<T>(text: &str) -> Result<T>
where
    T: std::str::FromStr,
    HltvError: From<T::Err>,
{
    Ok(text.trim().parse::<T>()?)
}

/// Turn a unix timestamp in milliseconds into a UTC date.
pub(crate) fn parse_unix_millis(raw: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = parse_number(raw)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| HltvError::InvalidTimestamp(raw.to_owned()))
}

/// Normalize a potentially relative link to an absolute URL under `base_url`.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        href.to_string()
    }
}
