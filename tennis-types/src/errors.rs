use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reasons a score string cannot be accepted as a tennis match.
///
/// Set numbers are 1-based, positions are 0-based token indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum ScoreError {
    #[error("score is empty")]
    EmptyScore,

    #[error("malformed set '{token}' at position {position}")]
    MalformedToken { position: usize, token: String },

    #[error("invalid tennis score: set {set_number} ({games}) is not a legal set result")]
    IllegalSetScore { set_number: usize, games: String },

    #[error("invalid tennis score: set {set_number} was won 7-6 but has no tiebreak score")]
    MissingTiebreak { set_number: usize },

    #[error("invalid tennis score: set {set_number} has a tiebreak score but was not 7-6")]
    UnexpectedTiebreak { set_number: usize },

    #[error("invalid tennis score: tiebreak {points} in set {set_number} is not a legal result")]
    IllegalTiebreak { set_number: usize, points: String },

    #[error("invalid tennis score: tiebreak in set {set_number} was won by the side that lost the set")]
    TiebreakWinnerMismatch { set_number: usize },

    #[error("invalid tennis score: set {set_number} was played after the match was decided")]
    SetsAfterCompletion { set_number: usize },

    #[error("match is not complete")]
    IncompleteMatch,
}

impl ScoreError {
    /// True for errors the user fixes by correcting the set scores themselves,
    /// as opposed to the text being unreadable.
    pub fn is_illegal_score(&self) -> bool {
        !matches!(
            self,
            ScoreError::EmptyScore | ScoreError::MalformedToken { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_mention_invalid_score() {
        let err = ScoreError::IllegalSetScore {
            set_number: 1,
            games: "6-8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid tennis score: set 1 (6-8) is not a legal set result"
        );
        assert!(err.is_illegal_score());
    }

    #[test]
    fn test_parse_errors_are_not_illegal_scores() {
        let err = ScoreError::MalformedToken {
            position: 2,
            token: "6/4".to_string(),
        };
        assert!(!err.is_illegal_score());
        assert!(!ScoreError::EmptyScore.is_illegal_score());
    }

    #[test]
    fn test_error_serializes_with_variant_name() {
        let json = serde_json::to_value(ScoreError::MissingTiebreak { set_number: 2 }).unwrap();
        assert_eq!(json["MissingTiebreak"]["set_number"], 2);
    }
}
