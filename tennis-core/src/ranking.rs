use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tennis_types::{Match, PlayerId, PlayerStats, RankingEntry};

use crate::StatsAggregator;

/// Tunable parts of the ranking points formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub points_per_win: u32,
    pub points_per_streak_win: u32,
    pub streak_bonus_cap: u32,
    pub consistency_bonus: u32,
    pub consistency_threshold: f64, // Win percentage
    pub points_per_match: u32,
    pub activity_bonus_cap: u32,
    pub loss_penalty: u32,
    pub provisional_threshold: u32, // Matches needed to lose the provisional flag
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            points_per_win: 10,
            points_per_streak_win: 3,
            streak_bonus_cap: 15,
            consistency_bonus: 15,
            consistency_threshold: 60.0,
            points_per_match: 1,
            activity_bonus_cap: 10,
            loss_penalty: 2,
            provisional_threshold: 5,
        }
    }
}

impl RankingWeights {
    /// Ranking points for one player, never below zero.
    pub fn points_for(&self, stats: &PlayerStats) -> u32 {
        let base = stats.wins * self.points_per_win;
        let streak =
            (stats.current_win_streak * self.points_per_streak_win).min(self.streak_bonus_cap);
        let consistency = if stats.total_matches > 0
            && stats.win_percentage >= self.consistency_threshold
        {
            self.consistency_bonus
        } else {
            0
        };
        let activity = (stats.total_matches * self.points_per_match).min(self.activity_bonus_cap);

        (base + streak + consistency + activity).saturating_sub(stats.losses * self.loss_penalty)
    }

    pub fn is_provisional(&self, stats: &PlayerStats) -> bool {
        stats.total_matches < self.provisional_threshold
    }
}

/// Players ordered by ranking points, best first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClubRanking {
    pub entries: Vec<RankingEntry>,
}

impl ClubRanking {
    pub fn from_stats(
        stats_by_player: &HashMap<PlayerId, PlayerStats>,
        weights: &RankingWeights,
    ) -> Self {
        let mut entries: Vec<RankingEntry> = stats_by_player
            .values()
            .map(|stats| RankingEntry {
                player_id: stats.player_id,
                points: weights.points_for(stats),
                rank: 0,
                is_provisional: weights.is_provisional(stats),
                total_matches: stats.total_matches,
                win_percentage: stats.win_percentage,
            })
            .collect();

        // Points, then win rate, then activity; player id keeps the order stable
        entries.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| {
                    b.win_percentage
                        .partial_cmp(&a.win_percentage)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| b.total_matches.cmp(&a.total_matches))
                .then_with(|| a.player_id.cmp(&b.player_id))
        });

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = (index + 1) as u32;
        }

        Self { entries }
    }

    /// Rank every registered player found in a club's matches.
    pub fn from_matches(
        matches: &[Match],
        aggregator: &StatsAggregator,
        weights: &RankingWeights,
    ) -> Self {
        Self::from_stats(&aggregator.aggregate_all(matches), weights)
    }

    pub fn top(&self, n: usize) -> &[RankingEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entry_for(&self, player_id: PlayerId) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }
}

/// Ranked entries for a set of per-player stats.
pub fn rank(
    stats_by_player: &HashMap<PlayerId, PlayerStats>,
    weights: &RankingWeights,
) -> Vec<RankingEntry> {
    ClubRanking::from_stats(stats_by_player, weights).entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn stats(wins: u32, losses: u32, streak: u32) -> PlayerStats {
        let total = wins + losses;
        PlayerStats {
            player_id: Uuid::new_v4(),
            total_matches: total,
            wins,
            losses,
            win_percentage: crate::percentage(wins, total),
            current_win_streak: streak,
            longest_win_streak: streak,
            ..Default::default()
        }
    }

    #[test]
    fn test_points_formula() {
        let weights = RankingWeights::default();
        // 5 wins: 50 base + 15 streak + 15 consistency + 5 activity
        assert_eq!(weights.points_for(&stats(5, 0, 5)), 85);
        // 3 wins 2 losses, streak broken: 30 + 0 + 15 + 5 - 4
        assert_eq!(weights.points_for(&stats(3, 2, 0)), 46);
        // Win rate under 60%: no consistency bonus
        assert_eq!(weights.points_for(&stats(1, 1, 1)), 10 + 3 + 2 - 2);
    }

    #[test]
    fn test_caps() {
        let weights = RankingWeights::default();
        // Streak capped at 15, activity at 10
        assert_eq!(weights.points_for(&stats(20, 0, 20)), 200 + 15 + 15 + 10);
    }

    #[test]
    fn test_points_floor_at_zero() {
        let weights = RankingWeights::default();
        assert_eq!(weights.points_for(&stats(0, 10, 0)), 0);
        assert_eq!(weights.points_for(&PlayerStats::default()), 0);
    }

    #[test]
    fn test_provisional_threshold() {
        let weights = RankingWeights::default();
        assert!(weights.is_provisional(&stats(4, 0, 4)));
        assert!(!weights.is_provisional(&stats(4, 1, 0)));
    }

    #[test]
    fn test_ties_broken_by_win_rate_then_activity() {
        let weights = RankingWeights {
            points_per_win: 0,
            points_per_streak_win: 0,
            consistency_bonus: 0,
            points_per_match: 0,
            loss_penalty: 0,
            ..Default::default()
        };

        let strong = stats(3, 1, 0);
        let busy = stats(2, 2, 0);
        let quiet = stats(1, 1, 0);

        let map: HashMap<_, _> = [&quiet, &busy, &strong]
            .into_iter()
            .map(|s| (s.player_id, s.clone()))
            .collect();
        let ranked = rank(&map, &weights);

        assert!(ranked.iter().all(|e| e.points == 0));
        assert_eq!(ranked[0].player_id, strong.player_id);
        assert_eq!(ranked[1].player_id, busy.player_id);
        assert_eq!(ranked[2].player_id, quiet.player_id);
        assert_eq!(
            ranked.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_top_and_entry_lookup() {
        let a = stats(5, 0, 5);
        let b = stats(1, 0, 1);
        let map: HashMap<_, _> = [(a.player_id, a.clone()), (b.player_id, b.clone())].into();
        let ranking = ClubRanking::from_stats(&map, &RankingWeights::default());

        assert_eq!(ranking.top(1).len(), 1);
        assert_eq!(ranking.top(10).len(), 2);
        assert_eq!(ranking.entry_for(b.player_id).map(|e| e.rank), Some(2));
        assert!(ranking.entry_for(Uuid::new_v4()).is_none());
    }
}
