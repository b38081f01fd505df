use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

/// Win/loss record restricted to one match type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchTypeRecord {
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub current_win_streak: u32,
    pub longest_win_streak: u32,
    pub singles_record: MatchTypeRecord,
    pub doubles_record: MatchTypeRecord,
}

impl PlayerStats {
    pub fn empty(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub points: u32,
    pub rank: u32,
    pub is_provisional: bool,
    pub total_matches: u32,
    pub win_percentage: f64,
}
