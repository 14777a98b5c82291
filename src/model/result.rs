use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one completed match, as listed on the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub match_id: u32,
    pub match_url: String,
    pub match_date: DateTime<Utc>,
    pub team1_name: String,
    pub team1_score: u8,
    pub team2_name: String,
    pub team2_score: u8,
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "MatchResult:")?;
        writeln!(f, "match_id: {}", self.match_id)?;
        writeln!(f, "match_url: {}", self.match_url)?;
        writeln!(f, "match_date: {}", self.match_date)?;
        writeln!(f, "team1_name: {}", self.team1_name)?;
        writeln!(f, "team1_score: {}", self.team1_score)?;
        writeln!(f, "team2_name: {}", self.team2_name)?;
        writeln!(f, "team2_score: {}", self.team2_score)
    }
}
