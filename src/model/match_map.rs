use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::common::{OptDisplay, Side, Team};

/// Stats for a single map of a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchMap {
    pub match_map_id: u32,
    pub match_id: u32,
    /// 1-based position of the map in the series.
    pub map_number: Option<u8>,
    pub map_name: Option<String>,
    pub teams: [MapTeam; 2],
    pub players: Vec<MatchMapPlayer>,
}

impl MatchMap {
    pub fn team(&self, team: Team) -> &MapTeam {
        &self.teams[team.index()]
    }
}

/// Per-team totals for one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTeam {
    pub team_id: u32,
    pub rounds_won: u8,
    pub first_half: HalfScore,
    pub second_half: HalfScore,
    pub bombs_exploded: u8,
    pub bombs_defused: u8,
}

/// The side a team started a half on and the rounds it won in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HalfScore {
    pub side: Side,
    pub rounds_won: u8,
}

/// One player's stat line on one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchMapPlayer {
    pub player_id: u32,
    pub match_map_id: u32,
    pub team_id: u32,
    pub side: Side,
    pub kills: u16,
    pub assists: u16,
    /// Not shown on older map pages.
    pub flash_assists: Option<u16>,
    pub deaths: u16,
    pub headshots: u16,
    pub first_kills: u16,
    pub first_deaths: u16,
    pub kast_percent: f32,
    pub adr: f32,
    pub rating: f32,
}

impl Display for MatchMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "MatchMap:")?;
        writeln!(f, "match_map_id: {}", self.match_map_id)?;
        writeln!(f, "match_id: {}", self.match_id)?;
        writeln!(f, "map_number: {}", OptDisplay(&self.map_number))?;
        writeln!(f, "map_name: {}", OptDisplay(&self.map_name))?;
        for (n, team) in self.teams.iter().enumerate() {
            let n = n + 1;
            writeln!(f, "team{n}_team_id: {}", team.team_id)?;
            writeln!(f, "team{n}_rounds_won: {}", team.rounds_won)?;
            writeln!(f, "team{n}_1h_side: {}", team.first_half.side)?;
            writeln!(f, "team{n}_1h_rounds_won: {}", team.first_half.rounds_won)?;
            writeln!(f, "team{n}_2h_side: {}", team.second_half.side)?;
            writeln!(f, "team{n}_2h_rounds_won: {}", team.second_half.rounds_won)?;
            writeln!(f, "team{n}_bombs_exploded: {}", team.bombs_exploded)?;
            writeln!(f, "team{n}_bombs_defused: {}", team.bombs_defused)?;
        }
        writeln!(f, "players: {}", self.players.len())
    }
}

impl Display for MatchMapPlayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "MatchMapPlayer:")?;
        writeln!(f, "player_id: {}", self.player_id)?;
        writeln!(f, "match_map_id: {}", self.match_map_id)?;
        writeln!(f, "team_id: {}", self.team_id)?;
        writeln!(f, "side: {}", self.side)?;
        writeln!(f, "kills: {}", self.kills)?;
        writeln!(f, "assists: {}", self.assists)?;
        writeln!(f, "flash_assists: {}", OptDisplay(&self.flash_assists))?;
        writeln!(f, "deaths: {}", self.deaths)?;
        writeln!(f, "headshots: {}", self.headshots)?;
        writeln!(f, "first_kills: {}", self.first_kills)?;
        writeln!(f, "first_deaths: {}", self.first_deaths)?;
        writeln!(f, "kast_percent: {}", self.kast_percent)?;
        writeln!(f, "adr: {}", self.adr)?;
        writeln!(f, "rating: {}", self.rating)
    }
}
