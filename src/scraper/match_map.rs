use std::str::FromStr;

use ::scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{HltvError, Result};
use crate::model::{HalfScore, MapTeam, MatchMap, MatchMapPlayer, Side, Team};
use crate::scraper::{
    self, absolute_url, attr, element_text, ids, match_map_player, parse_number, select_first,
    select_nth, select_text,
};
use crate::session::Session;

/// Round breakdown spans: 0/1 are the map totals, then team 1 and team 2
/// alternate for the first half (2, 3) and the second half (4, 5).
const TEAM1_FIRST_HALF_SPAN: usize = 2;
const TEAM2_FIRST_HALF_SPAN: usize = 3;
const TEAM1_SECOND_HALF_SPAN: usize = 4;
const TEAM2_SECOND_HALF_SPAN: usize = 5;

const BOMB_EXPLODED_MARKER: &str = "bomb_exploded";
const BOMB_DEFUSED_MARKER: &str = "bomb_defused";

/// Stats table classes and the side each one covers.
const STATS_TABLES: [(&str, Side); 3] = [
    ("totalstats", Side::Both),
    ("ctstats", Side::Ct),
    ("tstats", Side::T),
];

#[instrument(skip(session, config))]
pub(crate) async fn get_match_map<S: Session + ?Sized>(
    session: &mut S,
    config: &ClientConfig,
    url: &str,
    match_id: Option<u32>,
) -> Result<MatchMap> {
    let document = scraper::load_page(session, url, config.settle_delay).await?;
    let map = parse_match_map(&document, url, match_id, &config.base_url)?;
    debug!(
        match_map_id = map.match_map_id,
        map_name = map.map_name.as_deref().unwrap_or_default(),
        players = map.players.len(),
        "parsed match map"
    );
    Ok(map)
}

/// Parse a rendered map stats page. Without `match_id` the parent match is
/// read from the page's match link.
pub(crate) fn parse_match_map(
    document: &Html,
    url: &str,
    match_id: Option<u32>,
    base_url: &str,
) -> Result<MatchMap> {
    let root = document.root_element();
    let match_map_id = ids::match_map_id_from_url(url)?;
    let match_id = match match_id {
        Some(id) => id,
        None => parse_parent_match_id(&root, base_url)?,
    };

    let (map_number, map_name) = parse_map_number_and_name(&root)?;

    let halves = parse_halves(&root)?;
    let round_rows_selector = Selector::parse(".round-history-team-row")?;
    let teams = [Team::Team1, Team::Team2].map(|team| -> Result<MapTeam> {
        let (team_id, rounds_won) = parse_team_rounds(&root, team, base_url)?;
        let (first_half, second_half) = halves[team.index()];
        let round_row = select_nth(
            &root,
            &round_rows_selector,
            team.index(),
            "round history row (.round-history-team-row)",
        )?;
        Ok(MapTeam {
            team_id,
            rounds_won,
            first_half,
            second_half,
            bombs_exploded: count_round_icons(&round_row, BOMB_EXPLODED_MARKER)?,
            bombs_defused: count_round_icons(&round_row, BOMB_DEFUSED_MARKER)?,
        })
    });
    let [team1, team2] = teams;
    let teams = [team1?, team2?];

    let players = parse_players(&root, base_url, match_map_id, &teams)?;

    Ok(MatchMap {
        match_map_id,
        match_id,
        map_number,
        map_name,
        teams,
        players,
    })
}

fn parse_parent_match_id(root: &ElementRef, base_url: &str) -> Result<u32> {
    let link_selector = Selector::parse(".match-page-link")?;
    let link = select_first(root, &link_selector, "match link (.match-page-link)")?;
    ids::match_id_from_url(&absolute_url(base_url, attr(&link, "href", "match link href")?))
}

/// Best-of-one pages have no map tabs; the map name then follows the `Map`
/// label of the info box. Otherwise the first tab holds the series score and
/// the active one among the rest is this map.
fn parse_map_number_and_name(root: &ElementRef) -> Result<(Option<u8>, Option<String>)> {
    let tab_selector = Selector::parse(".stats-match-map")?;
    let tabs: Vec<ElementRef> = root.select(&tab_selector).collect();

    if tabs.is_empty() {
        let info_box_selector = Selector::parse(".match-info-box")?;
        let info_box = select_first(root, &info_box_selector, "match info box (.match-info-box)")?;
        let mut texts = info_box.text().map(str::trim).filter(|t| !t.is_empty());
        let map_name = texts
            .by_ref()
            .find(|t| *t == "Map")
            .and_then(|_| texts.next())
            .ok_or(HltvError::ElementNotFound {
                context: "map name after Map label (.match-info-box)",
            })?;
        return Ok((Some(1), Some(map_name.to_string())));
    }

    let name_selector = Selector::parse(".dynamic-map-name-full")?;
    for (number, tab) in (1u8..).zip(tabs.iter().skip(1)) {
        let class = tab.value().attr("class").unwrap_or_default();
        if !class.contains("inactive") {
            let name = select_text(tab, &name_selector, "map name (.dynamic-map-name-full)")?;
            return Ok((Some(number), Some(name)));
        }
    }
    Ok((None, None))
}

/// `.team-left` is team 1, `.team-right` team 2.
fn parse_team_rounds(root: &ElementRef, team: Team, base_url: &str) -> Result<(u32, u8)> {
    let (container, context) = match team {
        Team::Team1 => (".team-left", "team 1 container (.team-left)"),
        Team::Team2 => (".team-right", "team 2 container (.team-right)"),
    };
    let container_selector = Selector::parse(container)?;
    let container = select_first(root, &container_selector, context)?;

    let link_selector = Selector::parse("a")?;
    let link = select_first(&container, &link_selector, "team link (a)")?;
    let team_url = absolute_url(base_url, attr(&link, "href", "team link href")?);
    let team_id = ids::team_id_from_url(&team_url)?;

    let rounds_selector = Selector::parse("div")?;
    let rounds_won = parse_number(&select_text(&container, &rounds_selector, "team rounds (div)")?)?;
    Ok((team_id, rounds_won))
}

/// First and second half per team, indexed like [`Team::index`].
fn parse_halves(root: &ElementRef) -> Result<[(HalfScore, HalfScore); 2]> {
    let row_selector = Selector::parse(".match-info-box-con .match-info-row")?;
    let breakdown = select_first(root, &row_selector, "round breakdown (.match-info-row)")?;
    let span_selector = Selector::parse("span")?;
    let spans: Vec<ElementRef> = breakdown.select(&span_selector).collect();

    let half = |index: usize| -> Result<HalfScore> {
        let span = spans.get(index).ok_or(HltvError::ElementNotFound {
            context: "half score span (.match-info-row span)",
        })?;
        let class = span.value().attr("class").unwrap_or_default();
        let label = class.replace("-color", "").to_uppercase();
        let side = Side::from_str(&label).map_err(|_| HltvError::UnknownSide(label))?;
        Ok(HalfScore {
            side,
            rounds_won: parse_number(&element_text(span))?,
        })
    };

    Ok([
        (half(TEAM1_FIRST_HALF_SPAN)?, half(TEAM1_SECOND_HALF_SPAN)?),
        (half(TEAM2_FIRST_HALF_SPAN)?, half(TEAM2_SECOND_HALF_SPAN)?),
    ])
}

fn count_round_icons(round_row: &ElementRef, marker: &str) -> Result<u8> {
    let img_selector = Selector::parse("img")?;
    let count = round_row
        .select(&img_selector)
        .filter(|img| img.value().attr("src").unwrap_or_default().contains(marker))
        .count();
    Ok(u8::try_from(count).unwrap_or(u8::MAX))
}

/// Each side has one stats table per team, team 1 first.
fn parse_players(
    root: &ElementRef,
    base_url: &str,
    match_map_id: u32,
    teams: &[MapTeam; 2],
) -> Result<Vec<MatchMapPlayer>> {
    let row_selector = Selector::parse("tbody tr")?;
    let mut players = vec![];
    for (class, side) in STATS_TABLES {
        let table_selector = Selector::parse(&format!("table.stats-table.{class}"))?;
        for (table, team) in root.select(&table_selector).zip(teams) {
            for row in table.select(&row_selector) {
                players.push(match_map_player::parse_player(
                    &row,
                    base_url,
                    match_map_id,
                    team.team_id,
                    side,
                )?);
            }
        }
    }
    Ok(players)
}
