//! Numeric ids read from fixed segments of absolute hltv.org URLs.
//!
//! URLs are split on `/`, so for `https://www.hltv.org/teams/4411/nip` the
//! segments are `["https:", "", "www.hltv.org", "teams", "4411", "nip"]`.

use crate::error::{HltvError, Result};

/// `/teams/<id>/...`, `/matches/<id>/...`, `/events/<id>/...`, `/player/<id>/...`
const ID_SEGMENT: usize = 4;
/// Same templates behind a leading `/stats` segment.
const STATS_ID_SEGMENT: usize = 5;
/// `/stats/matches/mapstatsid/<id>/...`
const MATCH_MAP_ID_SEGMENT: usize = 6;

fn id_at(url: &str, index: usize, kind: &'static str) -> Result<u32> {
    url.split('/')
        .nth(index)
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| HltvError::UrlShape {
            url: url.to_owned(),
            kind,
        })
}

/// Whether the first path segment is `stats`.
fn is_stats_url(url: &str) -> bool {
    url.split('/').nth(3) == Some("stats")
}

/// `https://www.hltv.org/teams/4411/ninjas-in-pyjamas` or
/// `https://www.hltv.org/stats/teams/9943/atk`.
pub fn team_id_from_url(url: &str) -> Result<u32> {
    let index = if is_stats_url(url) {
        STATS_ID_SEGMENT
    } else {
        ID_SEGMENT
    };
    id_at(url, index, "team")
}

/// `https://www.hltv.org/matches/2363127/9ine-vs-g2-...`
pub fn match_id_from_url(url: &str) -> Result<u32> {
    id_at(url, ID_SEGMENT, "match")
}

/// `https://www.hltv.org/events/7148/blasttv-paris-major-2023`
pub fn event_id_from_url(url: &str) -> Result<u32> {
    id_at(url, ID_SEGMENT, "event")
}

/// `https://www.hltv.org/stats/matches/mapstatsid/154582/9ine-vs-g2`
pub fn match_map_id_from_url(url: &str) -> Result<u32> {
    id_at(url, MATCH_MAP_ID_SEGMENT, "match map")
}

/// `https://www.hltv.org/player/7998/s1mple` or
/// `https://www.hltv.org/stats/players/7998/s1mple`.
pub fn player_id_from_url(url: &str) -> Result<u32> {
    let index = if is_stats_url(url) {
        STATS_ID_SEGMENT
    } else {
        ID_SEGMENT
    };
    id_at(url, index, "player")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id() {
        assert_eq!(
            team_id_from_url("https://x/teams/4411/ninjas-in-pyjamas").unwrap(),
            4411
        );
        assert_eq!(team_id_from_url("https://x/stats/teams/9943/atk").unwrap(), 9943);
    }

    #[test]
    fn test_match_and_event_id() {
        assert_eq!(
            match_id_from_url("https://x/matches/2363127/9ine-vs-g2-blasttv-paris-major-2023")
                .unwrap(),
            2363127
        );
        assert_eq!(
            event_id_from_url("https://www.hltv.org/events/7148/blasttv-paris-major-2023").unwrap(),
            7148
        );
    }

    #[test]
    fn test_match_map_id() {
        assert_eq!(
            match_map_id_from_url("https://x/stats/matches/mapstatsid/154582/9ine-vs-g2").unwrap(),
            154582
        );
    }

    #[test]
    fn test_player_id() {
        assert_eq!(player_id_from_url("https://x/player/7998/s1mple").unwrap(), 7998);
        assert_eq!(
            player_id_from_url("https://x/stats/players/7998/s1mple").unwrap(),
            7998
        );
    }

    #[test]
    fn test_slug_named_stats_does_not_shift_index() {
        assert_eq!(team_id_from_url("https://x/teams/123/stats").unwrap(), 123);
    }

    #[test]
    fn test_malformed_urls_fail() {
        assert!(matches!(
            match_id_from_url("https://x/matches"),
            Err(HltvError::UrlShape { kind: "match", .. })
        ));
        assert!(team_id_from_url("https://x/teams/nip/4411").is_err());
        assert!(match_map_id_from_url("/stats/matches/mapstatsid/154582/x").is_err());
    }
}
