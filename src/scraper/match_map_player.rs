use ::scraper::{ElementRef, Selector};

use crate::error::{HltvError, Result};
use crate::model::{MatchMapPlayer, Side};
use crate::scraper::{absolute_url, attr, element_text, ids, parse_number, select_first, select_text};

/// Positions in the first-kill cell title, e.g. `3 first kills, 2 first deaths in a round`.
const FIRST_KILLS_TOKEN: usize = 0;
const FIRST_DEATHS_TOKEN: usize = 3;

/// Parse one row of a map stats table.
pub(crate) fn parse_player(
    row: &ElementRef,
    base_url: &str,
    match_map_id: u32,
    team_id: u32,
    side: Side,
) -> Result<MatchMapPlayer> {
    let link_selector = Selector::parse("td.st-player a")?;
    let link = select_first(row, &link_selector, "player link (td.st-player a)")?;
    let player_url = absolute_url(base_url, attr(&link, "href", "player link href")?);
    let player_id = ids::player_id_from_url(&player_url)?;

    let kills_selector = Selector::parse("td.st-kills")?;
    let kills_cell = select_first(row, &kills_selector, "kills cell (td.st-kills)")?;
    let kills = parse_number(&leading_token(&kills_cell))?;
    let headshots = parse_bracketed(&kills_cell)?.ok_or(HltvError::ElementNotFound {
        context: "headshots (td.st-kills span)",
    })?;

    let assists_selector = Selector::parse("td.st-assists")?;
    let assists_cell = select_first(row, &assists_selector, "assists cell (td.st-assists)")?;
    let assists = parse_number(&leading_token(&assists_cell))?;
    let flash_assists = parse_bracketed(&assists_cell)?;

    let deaths_selector = Selector::parse("td.st-deaths")?;
    let deaths = parse_number(&select_text(row, &deaths_selector, "deaths (td.st-deaths)")?)?;

    let fk_diff_selector = Selector::parse("td.st-fkdiff")?;
    let fk_diff = select_first(row, &fk_diff_selector, "first kill cell (td.st-fkdiff)")?;
    let fk_title = attr(&fk_diff, "title", "first kill cell title")?;
    let fk_tokens: Vec<&str> = fk_title.split_whitespace().collect();
    let first_kills =
        parse_number(fk_tokens.get(FIRST_KILLS_TOKEN).copied().unwrap_or_default())?;
    let first_deaths =
        parse_number(fk_tokens.get(FIRST_DEATHS_TOKEN).copied().unwrap_or_default())?;

    let kast_selector = Selector::parse("td.st-kdratio")?;
    let kast = select_text(row, &kast_selector, "KAST (td.st-kdratio)")?;
    let kast_percent = parse_number(&kast.replace('%', ""))?;

    let adr_selector = Selector::parse("td.st-adr")?;
    let adr = parse_number(&select_text(row, &adr_selector, "ADR (td.st-adr)")?)?;

    let rating_selector = Selector::parse("td.st-rating")?;
    let rating = parse_number(&select_text(row, &rating_selector, "rating (td.st-rating)")?)?;

    Ok(MatchMapPlayer {
        player_id,
        match_map_id,
        team_id,
        side,
        kills,
        assists,
        flash_assists,
        deaths,
        headshots,
        first_kills,
        first_deaths,
        kast_percent,
        adr,
        rating,
    })
}

/// `21 (10)` gives `21`. Quote characters are dropped.
fn leading_token(cell: &ElementRef) -> String {
    element_text(cell)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .replace('"', "")
}

/// The number in the cell's `(n)` span, if the page shows one.
fn parse_bracketed(cell: &ElementRef) -> Result<Option<u16>> {
    let span_selector = Selector::parse("span")?;
    cell.select(&span_selector)
        .next()
        .map(|span| parse_number(&element_text(&span).replace(['(', ')'], "")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use ::scraper::Html;

    use super::*;

    const BASE: &str = "https://www.hltv.org";

    fn row(assists: &str) -> String {
        format!(
            r#"<table><tbody><tr>
                 <td class="st-player"><div class="flag"></div><a href="/stats/players/7998/s1mple">s1mple</a></td>
                 <td class="st-kills">25 <span class="gtSmartphone-only">(11)</span></td>
                 <td class="st-assists">{assists}</td>
                 <td class="st-deaths">14</td>
                 <td class="st-kdratio">81.5%</td>
                 <td class="st-kddiff won">+11</td>
                 <td class="st-adr">101.3</td>
                 <td class="st-fkdiff won" title="5 first kills, 2 first deaths in a round">+3</td>
                 <td class="st-rating">1.64</td>
               </tr></tbody></table>"#
        )
    }

    fn parse(html: &str) -> Result<MatchMapPlayer> {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse("tr").unwrap();
        let tr = document.select(&selector).next().unwrap();
        parse_player(&tr, BASE, 154582, 4608, Side::Both)
    }

    #[test]
    fn test_parse_player_row() {
        let player = parse(&row(r#"4 <span class="gtSmartphone-only">(2)</span>"#)).unwrap();

        assert_eq!(
            player,
            MatchMapPlayer {
                player_id: 7998,
                match_map_id: 154582,
                team_id: 4608,
                side: Side::Both,
                kills: 25,
                assists: 4,
                flash_assists: Some(2),
                deaths: 14,
                headshots: 11,
                first_kills: 5,
                first_deaths: 2,
                kast_percent: 81.5,
                adr: 101.3,
                rating: 1.64,
            }
        );
    }

    #[test]
    fn test_flash_assists_absent_on_old_pages() {
        let player = parse(&row("4")).unwrap();
        assert_eq!(player.assists, 4);
        assert_eq!(player.flash_assists, None);
    }

    #[test]
    fn test_missing_cell_fails() {
        let html = row("4").replace(r#"<td class="st-adr">101.3</td>"#, "");
        assert!(parse(&html).is_err());
    }
}
