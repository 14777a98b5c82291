use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{Match, MatchDetail, MatchTeam, PickBan, PickType, Team};
use crate::scraper::{
    self, absolute_url, attr, element_text, ids, match_map, parse_number, parse_unix_millis,
    select_first, select_nth, select_text,
};
use crate::session::Session;

/// Veto summary wording of matches that were not actually played out.
const SKIP_KEYWORDS: [&str; 5] = ["forfeit", "default", "withdrew", "withdraw", "showmatch"];
const BEST_OF_PHRASE: &str = "Best of ";
const UNRANKED: &str = "Unranked";
const PICKED: &str = "picked";

#[instrument(skip(session, config))]
pub(crate) async fn get_match<S: Session + ?Sized>(
    session: &mut S,
    config: &ClientConfig,
    url: &str,
) -> Result<Match> {
    let parsed = {
        let document = scraper::load_page(session, url, config.settle_delay).await?;
        parse_match(&document, url, &config.base_url)?
    };
    let Some((mut detail, map_urls)) = parsed else {
        info!(url, "skipping forfeited or exhibition match");
        return Ok(Match::Skipped);
    };

    if config.fetch_match_maps {
        for map_url in &map_urls {
            let map =
                match_map::get_match_map(session, config, map_url, Some(detail.match_id)).await?;
            detail.match_maps.push(map);
        }
    }

    debug!(
        match_id = detail.match_id,
        pick_bans = detail.pick_bans.len(),
        maps = detail.match_maps.len(),
        "parsed match detail"
    );
    Ok(Match::Played(detail))
}

/// Parse a rendered match page. Returns `None` for skipped matches, otherwise
/// the match (without maps) and the map stats URLs in page order.
pub(crate) fn parse_match(
    document: &Html,
    url: &str,
    base_url: &str,
) -> Result<Option<(MatchDetail, Vec<String>)>> {
    let root = document.root_element();

    let veto_box_selector = Selector::parse(".veto-box")?;
    let veto_summary = select_text(&root, &veto_box_selector, "veto summary (.veto-box)")?;
    if is_skipped(&veto_summary) {
        return Ok(None);
    }

    let match_id = ids::match_id_from_url(url)?;

    let date_selector = Selector::parse(".date")?;
    let date = select_first(&root, &date_selector, "match date (.date)")?;
    let match_date = parse_unix_millis(attr(&date, "data-unix", "match date data-unix")?)?;

    let event_link_selector = Selector::parse(".event a")?;
    let event_link = select_first(&root, &event_link_selector, "event link (.event a)")?;
    let event_url = absolute_url(base_url, attr(&event_link, "href", "event link href")?);
    let event_id = ids::event_id_from_url(&event_url)?;

    let format_selector = Selector::parse(".preformatted-text")?;
    let format_text = select_text(&root, &format_selector, "format box (.preformatted-text)")?;
    let best_of = parse_best_of(&format_text)?;

    let teams_box_selector = Selector::parse("div.standard-box.teamsBox")?;
    let teams_box = select_first(&root, &teams_box_selector, "teams box (div.teamsBox)")?;
    let teams = [
        parse_team(&root, &teams_box, Team::Team1, base_url)?,
        parse_team(&root, &teams_box, Team::Team2, base_url)?,
    ];

    let pick_bans = parse_pick_bans(&root, match_id, &teams)?;

    let map_link_selector = Selector::parse(".results-stats")?;
    let map_urls = root
        .select(&map_link_selector)
        .map(|link| {
            attr(&link, "href", "map stats link href").map(|href| absolute_url(base_url, href))
        })
        .collect::<Result<Vec<_>>>()?;

    let detail = MatchDetail {
        match_id,
        match_date,
        url: url.to_string(),
        event_id,
        best_of,
        teams,
        pick_bans,
        match_maps: vec![],
    };
    Ok(Some((detail, map_urls)))
}

fn is_skipped(veto_summary: &str) -> bool {
    let veto_summary = veto_summary.to_lowercase();
    SKIP_KEYWORDS
        .iter()
        .any(|keyword| veto_summary.contains(keyword))
}

/// `Best of 3 (LAN)` gives 3; only the first character after the phrase is read.
fn parse_best_of(text: &str) -> Result<Option<u8>> {
    let Some((_, rest)) = text.split_once(BEST_OF_PHRASE) else {
        return Ok(None);
    };
    let digit: String = rest.chars().take(1).collect();
    parse_number(&digit).map(Some)
}

/// `World rank: #35` gives 35, `Unranked` gives `None`.
fn parse_world_rank(text: &str) -> Result<Option<u32>> {
    if text == UNRANKED {
        return Ok(None);
    }
    parse_number(text.split('#').nth(1).unwrap_or_default()).map(Some)
}

fn parse_team(
    root: &ElementRef,
    teams_box: &ElementRef,
    team: Team,
    base_url: &str,
) -> Result<MatchTeam> {
    let team_selector = Selector::parse(".team")?;
    let team_div = select_nth(teams_box, &team_selector, team.index(), "team block (.team)")?;

    let name_selector = Selector::parse(".teamName")?;
    let name = select_text(&team_div, &name_selector, "team name (.teamName)")?;

    let link_selector = Selector::parse("a")?;
    let link = select_first(&team_div, &link_selector, "team link (a)")?;
    let team_url = absolute_url(base_url, attr(&link, "href", "team link href")?);
    let team_id = ids::team_id_from_url(&team_url)?;

    let won_selector = Selector::parse(".won")?;
    let lost_selector = Selector::parse(".lost")?;
    let maps_won = team_div
        .select(&won_selector)
        .next()
        .or_else(|| team_div.select(&lost_selector).next())
        .map(|score| parse_number(&element_text(&score)))
        .transpose()?;

    let rank_selector = Selector::parse(".teamRanking")?;
    let rank = select_nth(root, &rank_selector, team.index(), "team ranking (.teamRanking)")?;
    let world_rank = parse_world_rank(&element_text(&rank))?;

    Ok(MatchTeam {
        name,
        team_id,
        maps_won,
        world_rank,
    })
}

/// Read the veto list from the second veto box. The final row is the decider
/// map and carries no pick or ban.
fn parse_pick_bans(
    root: &ElementRef,
    match_id: u32,
    teams: &[MatchTeam; 2],
) -> Result<Vec<PickBan>> {
    let veto_box_selector = Selector::parse(".veto-box")?;
    let veto_box = select_nth(root, &veto_box_selector, 1, "veto list (second .veto-box)")?;
    let padding_selector = Selector::parse(".padding")?;
    let veto_list = select_first(&veto_box, &padding_selector, "veto list (.padding)")?;

    let row_selector = Selector::parse("div")?;
    let rows = veto_list.select(&row_selector).collect_vec();
    let actions = &rows[..rows.len().saturating_sub(1)];

    let pick_bans = (1u8..)
        .zip(actions)
        .filter_map(|(pick_number, row)| parse_pick_ban(row, pick_number, match_id, teams))
        .collect();
    Ok(pick_bans)
}

/// `3. Astralis picked Inferno`: the team name sits between the number and
/// the last two words. Rows naming neither team yield `None`.
fn parse_pick_ban(
    row: &ElementRef,
    pick_number: u8,
    match_id: u32,
    teams: &[MatchTeam; 2],
) -> Option<PickBan> {
    let text = element_text(row);
    let tokens = text.split_whitespace().collect_vec();
    let team_name = tokens
        .get(1..tokens.len().saturating_sub(2))
        .map(|words| words.join(" "))
        .unwrap_or_default();
    let team_id = teams
        .iter()
        .find(|team| team.name == team_name)
        .map(|team| team.team_id)?;

    let pick_type = if text.contains(PICKED) {
        PickType::Pick
    } else {
        PickType::Ban
    };

    Some(PickBan {
        match_id,
        pick_number,
        team_id,
        pick_type,
        map_name: tokens.last()?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::StaticSession;

    const BASE: &str = "https://www.hltv.org";
    const URL: &str = "https://www.hltv.org/matches/2363127/9ine-vs-g2-blasttv-paris-major-2023";

    struct Page<'a> {
        format: &'a str,
        ranks: [&'a str; 2],
        scores: [&'a str; 2],
        vetoes: &'a [&'a str],
        map_links: &'a [&'a str],
    }

    impl Default for Page<'_> {
        fn default() -> Self {
            Self {
                format: "Best of 3 (Online)\n* Europe RMR B",
                ranks: ["World rank: #35", "World rank: #4"],
                scores: [r#"<div class="lost">0</div>"#, r#"<div class="won">2</div>"#],
                vetoes: &[
                    "1. G2 removed Ancient",
                    "2. 9INE removed Anubis",
                    "3. G2 picked Mirage",
                    "4. 9INE picked Nuke",
                    "5. G2 removed Overpass",
                    "6. 9INE removed Vertigo",
                    "7. Inferno was left over",
                ],
                map_links: &[],
            }
        }
    }

    impl Page<'_> {
        fn render(&self) -> String {
            let vetoes = self
                .vetoes
                .iter()
                .map(|v| format!("<div>{v}</div>"))
                .join("");
            let map_links = self
                .map_links
                .iter()
                .map(|href| format!(r#"<a href="{href}" class="results-stats">STATS</a>"#))
                .join("");
            format!(
                r#"<html><body>
                <div class="standard-box teamsBox">
                  <div class="team">
                    <div class="team1-gradient">
                      <a href="/team/11283/9ine"><div class="teamName">9INE</div></a>
                      {score1}
                    </div>
                  </div>
                  <div class="timeAndEvent">
                    <div class="time" data-unix="1684937700000">14:15</div>
                    <div class="date" data-unix="1684937700000">24th of May 2023</div>
                    <div class="event text-ellipsis"><a href="/events/7148/blasttv-paris-major-2023-europe-rmr-b">BLAST.tv Paris Major 2023 Europe RMR B</a></div>
                  </div>
                  <div class="team">
                    <div class="team2-gradient">
                      <a href="/team/5995/g2"><div class="teamName">G2</div></a>
                      {score2}
                    </div>
                  </div>
                </div>
                <div class="g-grid maps">
                  <div class="col-6 col-7-small">
                    <div class="standard-box veto-box"><div class="padding preformatted-text">{format}</div></div>
                    <div class="standard-box veto-box"><div class="padding">{vetoes}</div></div>
                  </div>
                </div>
                <div class="lineups">
                  <div class="teamRanking"><a href="/ranking/teams">{rank1}</a></div>
                  <div class="teamRanking"><a href="/ranking/teams">{rank2}</a></div>
                </div>
                {map_links}
                </body></html>"#,
                score1 = self.scores[0],
                score2 = self.scores[1],
                format = self.format,
                rank1 = self.ranks[0],
                rank2 = self.ranks[1],
            )
        }
    }

    fn parse(page: &Page) -> Option<(MatchDetail, Vec<String>)> {
        parse_match(&Html::parse_document(&page.render()), URL, BASE).unwrap()
    }

    #[test]
    fn test_parse_match_reads_header() {
        let (detail, map_urls) = parse(&Page::default()).unwrap();

        assert_eq!(detail.match_id, 2363127);
        assert_eq!(detail.url, URL);
        assert_eq!(detail.match_date.timestamp(), 1_684_937_700);
        assert_eq!(detail.event_id, 7148);
        assert_eq!(detail.best_of, Some(3));
        assert_eq!(
            detail.teams,
            [
                MatchTeam {
                    name: "9INE".to_string(),
                    team_id: 11283,
                    maps_won: Some(0),
                    world_rank: Some(35),
                },
                MatchTeam {
                    name: "G2".to_string(),
                    team_id: 5995,
                    maps_won: Some(2),
                    world_rank: Some(4),
                },
            ]
        );
        assert!(map_urls.is_empty());
        assert!(detail.match_maps.is_empty());
    }

    #[test]
    fn test_unranked_and_missing_score_are_absent() {
        let page = Page {
            ranks: ["Unranked", "World rank: #4"],
            scores: ["", r#"<div class="tie">1</div>"#],
            ..Page::default()
        };
        let (detail, _) = parse(&page).unwrap();
        assert_eq!(detail.team(Team::Team1).world_rank, None);
        assert_eq!(detail.team(Team::Team1).maps_won, None);
        assert_eq!(detail.team(Team::Team2).world_rank, Some(4));
        assert_eq!(detail.team(Team::Team2).maps_won, None);
    }

    #[test]
    fn test_pick_bans_drop_decider() {
        let (detail, _) = parse(&Page::default()).unwrap();

        let summary = detail
            .pick_bans
            .iter()
            .map(|pb| (pb.pick_number, pb.team_id, pb.pick_type, pb.map_name.as_str()))
            .collect_vec();
        assert_eq!(
            summary,
            vec![
                (1, 5995, PickType::Ban, "Ancient"),
                (2, 11283, PickType::Ban, "Anubis"),
                (3, 5995, PickType::Pick, "Mirage"),
                (4, 11283, PickType::Pick, "Nuke"),
                (5, 5995, PickType::Ban, "Overpass"),
                (6, 11283, PickType::Ban, "Vertigo"),
            ]
        );
        assert!(detail.pick_bans.iter().all(|pb| pb.match_id == 2363127));
    }

    #[test]
    fn test_pick_ban_with_unknown_team_is_dropped() {
        let page = Page {
            vetoes: &[
                "1. Ninjas in Pyjamas removed Nuke",
                "2. G2 picked Mirage",
                "3. Inferno was left over",
            ],
            ..Page::default()
        };
        let (detail, _) = parse(&page).unwrap();
        assert_eq!(detail.pick_bans.len(), 1);
        assert_eq!(detail.pick_bans[0].pick_number, 2);
        assert_eq!(detail.pick_bans[0].pick_type, PickType::Pick);
    }

    #[test]
    fn test_skip_keywords_any_case() {
        for summary in [
            "Best of 1 (Online) * ShowMatch",
            "G2 won by FORFEIT",
            "9INE won by default",
            "Team withdrew from the event",
        ] {
            let page = Page {
                format: summary,
                ..Page::default()
            };
            assert!(parse(&page).is_none(), "{summary} should be skipped");
        }
    }

    #[test]
    fn test_best_of() {
        assert_eq!(parse_best_of("Best of 3 (LAN)").unwrap(), Some(3));
        assert_eq!(parse_best_of("* Grand final").unwrap(), None);
        assert!(parse_best_of("Best of three").is_err());
    }

    #[test]
    fn test_world_rank() {
        assert_eq!(parse_world_rank("Unranked").unwrap(), None);
        assert_eq!(parse_world_rank("World rank: #35").unwrap(), Some(35));
        assert!(parse_world_rank("World rank").is_err());
    }

    #[test]
    fn test_bad_match_url_fails() {
        let html = Html::parse_document(&Page::default().render());
        assert!(parse_match(&html, "https://www.hltv.org/matches", BASE).is_err());
    }

    #[tokio::test]
    async fn test_get_match_skipped_reads_nothing_else() {
        let html = "<html><body><div class=\"veto-box\">Showmatch</div></body></html>";
        let mut session = StaticSession::new().with_page(URL, html);
        let config = ClientConfig::default().with_settle_delay(Duration::ZERO);

        let result = get_match(&mut session, &config, URL).await.unwrap();

        assert_eq!(result, Match::Skipped);
        assert_eq!(session.visited(), [URL]);
    }

    #[tokio::test]
    async fn test_get_match_without_maps_does_not_follow_links() {
        let page = Page {
            map_links: &["/stats/matches/mapstatsid/154582/9ine-vs-g2"],
            ..Page::default()
        };
        let mut session = StaticSession::new().with_page(URL, page.render());
        let config = ClientConfig::default()
            .with_settle_delay(Duration::ZERO)
            .with_match_maps(false);

        let result = get_match(&mut session, &config, URL).await.unwrap();

        assert!(result.detail().unwrap().match_maps.is_empty());
        assert_eq!(session.visited(), [URL]);
    }
}
