use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use strum_macros::{EnumIter, EnumString};

/// One of the two teams of a match, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, strum_macros::Display)]
pub enum Team {
    Team1,
    Team2,
}

impl Team {
    /// Zero-based position of the team on the page.
    pub fn index(self) -> usize {
        match self {
            Team::Team1 => 0,
            Team::Team2 => 1,
        }
    }
}

/// The side a team or player played on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    /// Both halves combined.
    Both,
    #[strum(serialize = "T")]
    T,
    #[strum(serialize = "CT")]
    #[serde(rename = "CT")]
    Ct,
}

/// Whether a draft action picked or removed a map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
pub enum PickType {
    Pick,
    Ban,
}

/// Renders an optional field as its value or `None`.
pub(crate) struct OptDisplay<'a, T>(pub(crate) &'a Option<T>);

impl<T: Display> Display for OptDisplay<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}
