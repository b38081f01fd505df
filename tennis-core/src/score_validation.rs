use tennis_types::{ScoreError, SetScore, TiebreakScore, ValidatedScore};

use crate::{CompletionPolicy, parse_strict, resolve_with};

/// A finished tiebreak: first to 7 by two, and once past 7 it only ends on a
/// two-point margin.
pub fn is_legal_tiebreak(tiebreak: &TiebreakScore) -> bool {
    let high = tiebreak.player_points.max(tiebreak.opponent_points);
    let low = tiebreak.player_points.min(tiebreak.opponent_points);
    let margin = high - low;

    high >= 7 && margin >= 2 && (high == 7 || margin == 2)
}

/// 6-0 through 6-4, 7-5 or 7-6 in either order.
pub fn is_legal_game_count(player_games: u32, opponent_games: u32) -> bool {
    let high = player_games.max(opponent_games);
    let low = player_games.min(opponent_games);

    matches!((high, low), (6, 0..=4) | (7, 5) | (7, 6))
}

/// Check one set. `set_number` is 1-based and only used for error reporting.
pub fn validate_set(set: &SetScore, set_number: usize) -> Result<(), ScoreError> {
    if !is_legal_game_count(set.player_games, set.opponent_games) {
        return Err(ScoreError::IllegalSetScore {
            set_number,
            games: format!("{}-{}", set.player_games, set.opponent_games),
        });
    }

    match (&set.tiebreak, set.is_tiebreak_set()) {
        (None, true) => Err(ScoreError::MissingTiebreak { set_number }),
        (Some(_), false) => Err(ScoreError::UnexpectedTiebreak { set_number }),
        (None, false) => Ok(()),
        (Some(tiebreak), true) => {
            if !is_legal_tiebreak(tiebreak) {
                return Err(ScoreError::IllegalTiebreak {
                    set_number,
                    points: tiebreak.to_string(),
                });
            }
            if tiebreak.winner() != set.winner() {
                return Err(ScoreError::TiebreakWinnerMismatch { set_number });
            }
            Ok(())
        }
    }
}

/// Every set must be legal on its own; the first offending set is reported.
pub fn validate_sets(sets: &[SetScore]) -> Result<(), ScoreError> {
    sets.iter()
        .enumerate()
        .try_for_each(|(index, set)| validate_set(set, index + 1))
}

/// Strict path from raw text to a resolved match.
pub fn validate_score(
    score: &str,
    policy: &dyn CompletionPolicy,
) -> Result<ValidatedScore, ScoreError> {
    let sets = parse_strict(score)?;
    let result = resolve_with(&sets, policy)?;
    Ok(ValidatedScore { sets, result })
}

/// Like [`validate_score`] but also refuses a match that isn't finished, which
/// is what saving a match requires.
pub fn validate_for_submission(
    score: &str,
    policy: &dyn CompletionPolicy,
) -> Result<ValidatedScore, ScoreError> {
    let validated = validate_score(score, policy)?;
    if !validated.result.is_complete {
        return Err(ScoreError::IncompleteMatch);
    }
    Ok(validated)
}
