use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// One of the two competing parties of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Side {
    A, // Listed first in the score string
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TiebreakScore {
    pub player_points: u32,
    pub opponent_points: u32,
}

impl TiebreakScore {
    pub fn new(player_points: u32, opponent_points: u32) -> Self {
        Self {
            player_points,
            opponent_points,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.player_points.cmp(&self.opponent_points) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for TiebreakScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.player_points, self.opponent_points)
    }
}

/// Games won by each side in a single set. `player_games` always belongs to
/// side A, `opponent_games` to side B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SetScore {
    pub player_games: u32,
    pub opponent_games: u32,
    pub tiebreak: Option<TiebreakScore>,
}

impl SetScore {
    pub fn new(player_games: u32, opponent_games: u32) -> Self {
        Self {
            player_games,
            opponent_games,
            tiebreak: None,
        }
    }

    pub fn with_tiebreak(
        player_games: u32,
        opponent_games: u32,
        tiebreak: TiebreakScore,
    ) -> Self {
        Self {
            player_games,
            opponent_games,
            tiebreak: Some(tiebreak),
        }
    }

    /// Side with more games, regardless of whether the set is legal.
    pub fn winner(&self) -> Option<Side> {
        match self.player_games.cmp(&self.opponent_games) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True for a 7-6 or 6-7 game count.
    pub fn is_tiebreak_set(&self) -> bool {
        matches!(
            (self.player_games, self.opponent_games),
            (7, 6) | (6, 7)
        )
    }

    /// Games as (won, lost) seen from `side`.
    pub fn games_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::A => (self.player_games, self.opponent_games),
            Side::B => (self.opponent_games, self.player_games),
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.player_games, self.opponent_games)?;
        if let Some(tiebreak) = &self.tiebreak {
            write!(f, "({})", tiebreak)?;
        }
        Ok(())
    }
}

/// Outcome derived from a match's sets. Never stored on its own; the score
/// string stays the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResult {
    pub winner: Option<Side>,
    pub is_complete: bool,
    pub sets_won_a: u32,
    pub sets_won_b: u32,
}

impl MatchResult {
    pub fn undecided(sets_won_a: u32, sets_won_b: u32) -> Self {
        Self {
            winner: None,
            is_complete: false,
            sets_won_a,
            sets_won_b,
        }
    }
}

/// Strictly parsed sets together with their resolved result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidatedScore {
    pub sets: Vec<SetScore>,
    pub result: MatchResult,
}

/// Which winner-determination policy a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PolicyKind {
    #[default]
    #[serde(rename = "majority")]
    Majority,
    #[serde(rename = "best_of_3")]
    BestOfThree,
    #[serde(rename = "best_of_5")]
    BestOfFive,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(PolicyKind::Majority),
            "best_of_3" => Ok(PolicyKind::BestOfThree),
            "best_of_5" => Ok(PolicyKind::BestOfFive),
            other => Err(format!("Unknown completion policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_display() {
        assert_eq!(SetScore::new(6, 4).to_string(), "6-4");
        assert_eq!(
            SetScore::with_tiebreak(7, 6, TiebreakScore::new(7, 3)).to_string(),
            "7-6(7-3)"
        );
    }

    #[test]
    fn test_games_for_swaps_side_b() {
        let set = SetScore::new(6, 3);
        assert_eq!(set.games_for(Side::A), (6, 3));
        assert_eq!(set.games_for(Side::B), (3, 6));
        assert_eq!(set.winner(), Some(Side::A));
        assert_eq!(SetScore::new(5, 5).winner(), None);
    }

    #[test]
    fn test_policy_kind_from_str() {
        assert_eq!("majority".parse::<PolicyKind>(), Ok(PolicyKind::Majority));
        assert_eq!("BEST_OF_3".parse::<PolicyKind>(), Ok(PolicyKind::BestOfThree));
        assert_eq!("best_of_5".parse::<PolicyKind>(), Ok(PolicyKind::BestOfFive));
        assert!("best_of_4".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn test_policy_kind_serde_names() {
        let json = serde_json::to_string(&PolicyKind::BestOfThree).unwrap();
        assert_eq!(json, "\"best_of_3\"");
        let kind: PolicyKind = serde_json::from_str("\"majority\"").unwrap();
        assert_eq!(kind, PolicyKind::Majority);
    }
}
