use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{OptDisplay, PickType, Team};
use super::match_map::MatchMap;

/// A match page, either scraped in full or skipped as non-competitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Match {
    /// Forfeit, walkover, withdrawal or showmatch. Nothing else is read.
    Skipped,
    Played(MatchDetail),
}

impl Match {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Match::Skipped)
    }

    /// The scraped details, unless the match was skipped.
    pub fn detail(&self) -> Option<&MatchDetail> {
        match self {
            Match::Skipped => None,
            Match::Played(detail) => Some(detail),
        }
    }
}

/// Full details of a single played match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub match_id: u32,
    pub match_date: DateTime<Utc>,
    pub url: String,
    pub event_id: u32,
    pub best_of: Option<u8>,
    pub teams: [MatchTeam; 2],
    pub pick_bans: Vec<PickBan>,
    pub match_maps: Vec<MatchMap>,
}

impl MatchDetail {
    pub fn team(&self, team: Team) -> &MatchTeam {
        &self.teams[team.index()]
    }
}

/// A team as shown in the match page header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTeam {
    pub name: String,
    pub team_id: u32,
    /// `None` when the page shows neither a won nor a lost score.
    pub maps_won: Option<u8>,
    /// `None` when the team is unranked.
    pub world_rank: Option<u32>,
}

/// A single pick or ban of the map veto.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickBan {
    pub match_id: u32,
    pub pick_number: u8,
    pub team_id: u32,
    pub pick_type: PickType,
    pub map_name: String,
}

impl Display for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Match::Skipped => writeln!(f, "Match:\nskipped: true"),
            Match::Played(detail) => detail.fmt(f),
        }
    }
}

impl Display for MatchDetail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match:")?;
        writeln!(f, "match_id: {}", self.match_id)?;
        writeln!(f, "match_date: {}", self.match_date)?;
        writeln!(f, "url: {}", self.url)?;
        writeln!(f, "event_id: {}", self.event_id)?;
        writeln!(f, "best_of: {}", OptDisplay(&self.best_of))?;
        for (n, team) in self.teams.iter().enumerate() {
            let n = n + 1;
            writeln!(f, "team{n}_name: {}", team.name)?;
            writeln!(f, "team{n}_team_id: {}", team.team_id)?;
            writeln!(f, "team{n}_maps_won: {}", OptDisplay(&team.maps_won))?;
            writeln!(f, "team{n}_world_rank: {}", OptDisplay(&team.world_rank))?;
        }
        writeln!(f, "pick_bans: {}", self.pick_bans.len())?;
        writeln!(f, "match_maps: {}", self.match_maps.len())
    }
}

impl Display for PickBan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "PickBan:")?;
        writeln!(f, "match_id: {}", self.match_id)?;
        writeln!(f, "pick_number: {}", self.pick_number)?;
        writeln!(f, "team_id: {}", self.team_id)?;
        writeln!(f, "pick_type: {}", self.pick_type)?;
        writeln!(f, "map_name: {}", self.map_name)
    }
}
