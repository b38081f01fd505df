use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tennis_types::{
    Match, MatchResult, MatchType, MatchTypeRecord, PlayerId, PlayerStats, SetScore,
};
use tracing::{debug, warn};

use crate::{CompletionPolicy, MajorityOfPlayed, validate_score};

/// `part / whole * 100`, rounded to two decimals. Zero when `whole` is zero.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let value = f64::from(part) / f64::from(whole) * 100.0;
    (value * 100.0).round() / 100.0
}

/// A match whose score passed validation and produced a finished result.
#[derive(Debug, Clone)]
pub struct ScoredMatch<'a> {
    pub record: &'a Match,
    pub sets: Vec<SetScore>,
    pub result: MatchResult,
}

/// Folds match histories into [`PlayerStats`]. Holds only the completion
/// policy used to decide who won each match.
#[derive(Clone)]
pub struct StatsAggregator {
    policy: Arc<dyn CompletionPolicy>,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(Arc::new(MajorityOfPlayed))
    }
}

impl StatsAggregator {
    pub fn new(policy: Arc<dyn CompletionPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &dyn CompletionPolicy {
        self.policy.as_ref()
    }

    /// Validate and resolve every match once, dropping the ones that can't
    /// count towards anyone's record. Result is ordered by play date, with
    /// input order kept for matches on the same date. Dates compare as
    /// zero-padded `YYYY-MM-DD` text.
    pub fn scored_matches<'a>(&self, matches: &'a [Match]) -> Vec<ScoredMatch<'a>> {
        let mut scored: Vec<ScoredMatch<'a>> = matches
            .iter()
            .filter_map(|record| {
                let validated = match validate_score(&record.score, self.policy()) {
                    Ok(validated) => validated,
                    Err(err) => {
                        warn!(
                            "Skipping match {} with invalid score {:?}: {}",
                            record.id, record.score, err
                        );
                        return None;
                    }
                };

                if !validated.result.is_complete {
                    debug!("Skipping unfinished match {}", record.id);
                    return None;
                }

                Some(ScoredMatch {
                    record,
                    sets: validated.sets,
                    result: validated.result,
                })
            })
            .collect();

        scored.sort_by(|a, b| a.record.played_on.cmp(&b.record.played_on));
        scored
    }

    /// Stats for one player over `matches`. Matches the player isn't on, and
    /// matches that fail validation, are skipped.
    pub fn aggregate(&self, matches: &[Match], player_id: PlayerId) -> PlayerStats {
        let scored = self.scored_matches(matches);
        Self::aggregate_scored(&scored, player_id)
    }

    /// Stats for every registered player appearing in `matches`.
    pub fn aggregate_all(&self, matches: &[Match]) -> HashMap<PlayerId, PlayerStats> {
        let scored = self.scored_matches(matches);

        let players: BTreeSet<PlayerId> = scored
            .iter()
            .flat_map(|m| m.record.registered_players())
            .collect();

        players
            .into_iter()
            .map(|player_id| (player_id, Self::aggregate_scored(&scored, player_id)))
            .collect()
    }

    pub fn aggregate_scored(scored: &[ScoredMatch<'_>], player_id: PlayerId) -> PlayerStats {
        let mut stats = PlayerStats::empty(player_id);
        let mut singles = (0u32, 0u32);
        let mut doubles = (0u32, 0u32);

        for m in scored {
            let Some(side) = m.record.side_of(player_id) else {
                if m.record.is_participant(player_id) {
                    warn!(
                        "Player {} appears on both sides of match {}",
                        player_id, m.record.id
                    );
                }
                continue;
            };

            let won = m.result.winner == Some(side);
            let record = match m.record.match_type {
                MatchType::Singles => &mut singles,
                MatchType::Doubles => &mut doubles,
            };

            if won {
                stats.wins += 1;
                record.0 += 1;
                stats.current_win_streak += 1;
                stats.longest_win_streak = stats.longest_win_streak.max(stats.current_win_streak);
            } else {
                stats.losses += 1;
                record.1 += 1;
                stats.current_win_streak = 0;
            }

            for set in &m.sets {
                let (won_games, lost_games) = set.games_for(side);
                stats.games_won += won_games;
                stats.games_lost += lost_games;

                if set.winner() == Some(side) {
                    stats.sets_won += 1;
                } else {
                    stats.sets_lost += 1;
                }
            }
        }

        stats.total_matches = stats.wins + stats.losses;
        stats.win_percentage = percentage(stats.wins, stats.total_matches);
        stats.singles_record = type_record(singles);
        stats.doubles_record = type_record(doubles);
        stats
    }
}

fn type_record((wins, losses): (u32, u32)) -> MatchTypeRecord {
    MatchTypeRecord {
        wins,
        losses,
        win_percentage: percentage(wins, wins + losses),
    }
}
