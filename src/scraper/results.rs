use ::scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::config::{ClientConfig, RESULTS_PAGE_SIZE};
use crate::error::Result;
use crate::model::MatchResult;
use crate::scraper::{
    self, attr, element_text, ids, parse_number, parse_unix_millis, select_first, select_nth,
    select_text,
};
use crate::session::Session;

/// Set on every listing row except the featured results at the top.
const GROUPING_UNIX_ATTR: &str = "data-zonedgrouping-entry-unix";

#[instrument(skip(session, config))]
pub(crate) async fn get_results<S: Session + ?Sized>(
    session: &mut S,
    config: &ClientConfig,
    offset_start: u32,
    offset_end: u32,
) -> Result<Vec<MatchResult>> {
    let mut results = vec![];
    let mut offset = offset_start;
    while offset <= offset_end {
        let url = format!("{}/results?offset={offset}", config.base_url);
        let page = {
            let document = scraper::load_page(session, &url, config.settle_delay).await?;
            parse_results(&document, &config.base_url)?
        };
        debug!(offset, count = page.len(), "parsed results page");
        results.extend(page);
        offset = match offset.checked_add(RESULTS_PAGE_SIZE) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(results)
}

pub(crate) fn parse_results(document: &Html, base_url: &str) -> Result<Vec<MatchResult>> {
    let selector = Selector::parse("div.result-con")?;
    document
        .select(&selector)
        .filter(|row| row.value().attr(GROUPING_UNIX_ATTR).is_some())
        .map(|row| parse_result(&row, base_url))
        .collect()
}

/// Build a result from one non-featured listing row.
pub(crate) fn parse_result(row: &ElementRef, base_url: &str) -> Result<MatchResult> {
    let link_selector = Selector::parse("a")?;
    let link = select_first(row, &link_selector, "result link (a)")?;
    let match_url = scraper::absolute_url(base_url, attr(&link, "href", "result link href")?);
    let match_id = ids::match_id_from_url(&match_url)?;

    let match_date = parse_unix_millis(attr(row, GROUPING_UNIX_ATTR, "result timestamp")?)?;

    let team1_selector = Selector::parse(".team1")?;
    let team1_name = select_text(row, &team1_selector, "result team 1 (.team1)")?;
    let team2_selector = Selector::parse(".team2")?;
    let team2_name = select_text(row, &team2_selector, "result team 2 (.team2)")?;

    let score_cell_selector = Selector::parse(".result-score")?;
    let score_cell = select_first(row, &score_cell_selector, "result score (.result-score)")?;
    let span_selector = Selector::parse("span")?;
    let team1_score = select_nth(&score_cell, &span_selector, 0, "team 1 score span")?;
    let team1_score = parse_number(&element_text(&team1_score))?;
    let team2_score = select_nth(&score_cell, &span_selector, 1, "team 2 score span")?;
    let team2_score = parse_number(&element_text(&team2_score))?;

    Ok(MatchResult {
        match_id,
        match_url,
        match_date,
        team1_name,
        team1_score,
        team2_name,
        team2_score,
    })
}
