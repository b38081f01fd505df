use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::Side;

pub type PlayerId = Uuid;
pub type MatchId = Uuid;
pub type ClubId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MatchType {
    Singles,
    Doubles,
}

impl MatchType {
    /// Number of participants each side fields.
    pub fn side_size(self) -> usize {
        match self {
            MatchType::Singles => 1,
            MatchType::Doubles => 2,
        }
    }
}

/// Someone on court: either a registered player or a guest known only by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Participant {
    Registered { player_id: PlayerId },
    Guest { name: String },
}

impl Participant {
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Participant::Registered { player_id } => Some(*player_id),
            Participant::Guest { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Match {
    pub id: MatchId,
    pub club_id: ClubId,
    pub match_type: MatchType,
    pub side_a: Vec<Participant>,
    pub side_b: Vec<Participant>,
    pub score: String,         // Source of truth for sets and result
    pub played_on: String,     // YYYY-MM-DD, zero-padded
    pub notes: Option<String>,
    pub recorded_by: PlayerId,
    pub created_at: String, // ISO 8601 string
    pub updated_at: String, // ISO 8601 string
}

impl Match {
    pub fn participants(&self, side: Side) -> &[Participant] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// Side the player is registered on. `None` if the player is absent, or
    /// listed on both sides which makes the record unusable for that player.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        let on_side = |side: Side| {
            self.participants(side)
                .iter()
                .any(|p| p.player_id() == Some(player_id))
        };

        match (on_side(Side::A), on_side(Side::B)) {
            (true, false) => Some(Side::A),
            (false, true) => Some(Side::B),
            _ => None,
        }
    }

    pub fn is_participant(&self, player_id: PlayerId) -> bool {
        self.registered_players().any(|id| id == player_id)
    }

    pub fn registered_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.side_a
            .iter()
            .chain(self.side_b.iter())
            .filter_map(Participant::player_id)
    }

    /// Both sides field the number of participants the match type requires.
    pub fn has_valid_roster(&self) -> bool {
        let size = self.match_type.side_size();
        self.side_a.len() == size && self.side_b.len() == size
    }
}
