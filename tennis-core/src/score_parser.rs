use regex::Regex;
use std::sync::LazyLock;
use tennis_types::{ScoreError, SetScore, TiebreakScore};
use tracing::debug;

static SET_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)-(\d+)(?:\((\d+)-(\d+)\))?$").expect("set token pattern is valid")
});

/// Parse a single `N-N` or `N-N(N-N)` token.
fn parse_token(token: &str) -> Option<SetScore> {
    let caps = SET_TOKEN.captures(token)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let player_games = number(1)?;
    let opponent_games = number(2)?;

    match (caps.get(3), caps.get(4)) {
        (Some(_), Some(_)) => {
            let tiebreak = TiebreakScore::new(number(3)?, number(4)?);
            Some(SetScore::with_tiebreak(player_games, opponent_games, tiebreak))
        }
        _ => Some(SetScore::new(player_games, opponent_games)),
    }
}

fn tokens(score: &str) -> impl Iterator<Item = (usize, &str)> {
    score.split(',').map(str::trim).enumerate()
}

/// Lenient parse for live display. Tokens that don't match the grammar are
/// dropped; an empty or blank score yields no sets.
pub fn parse(score: &str) -> Vec<SetScore> {
    if score.trim().is_empty() {
        return Vec::new();
    }

    tokens(score)
        .filter_map(|(position, token)| {
            let set = parse_token(token);
            if set.is_none() {
                debug!("Skipping malformed set token {:?} at position {}", token, position);
            }
            set
        })
        .collect()
}

/// Parse for submission: the first malformed token fails the whole score.
pub fn parse_strict(score: &str) -> Result<Vec<SetScore>, ScoreError> {
    if score.trim().is_empty() {
        return Err(ScoreError::EmptyScore);
    }

    tokens(score)
        .map(|(position, token)| {
            parse_token(token).ok_or_else(|| ScoreError::MalformedToken {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Canonical score string, the inverse of [`parse`] for well-formed sets.
pub fn format_sets(sets: &[SetScore]) -> String {
    sets.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_sets() {
        let sets = parse("6-4,6-3");
        assert_eq!(sets, vec![SetScore::new(6, 4), SetScore::new(6, 3)]);
    }

    #[test]
    fn test_parse_tiebreak_set() {
        let sets = parse("6-4,7-6(7-3),6-2");
        assert_eq!(sets.len(), 3);
        assert_eq!(
            sets[1],
            SetScore::with_tiebreak(7, 6, TiebreakScore::new(7, 3))
        );
        assert_eq!(sets[2], SetScore::new(6, 2));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_parse_skips_malformed_tokens() {
        // Order of the remaining sets is preserved
        let sets = parse("6-4,abc,6/3,7-5,6-4-2,3-6(");
        assert_eq!(sets, vec![SetScore::new(6, 4), SetScore::new(7, 5)]);
    }

    #[test]
    fn test_parse_does_not_validate_legality() {
        // "6-8" is readable, legality is decided later
        assert_eq!(parse("6-8"), vec![SetScore::new(6, 8)]);
    }

    #[test]
    fn test_parse_tolerates_spaces_around_tokens() {
        assert_eq!(
            parse("6-4, 6-3"),
            vec![SetScore::new(6, 4), SetScore::new(6, 3)]
        );
    }

    #[test]
    fn test_parse_overflowing_number_is_malformed() {
        assert!(parse("99999999999-0").is_empty());
        assert!(matches!(
            parse_strict("99999999999-0"),
            Err(ScoreError::MalformedToken { position: 0, .. })
        ));
    }

    #[test]
    fn test_parse_strict_reports_position() {
        let err = parse_strict("6-4,x-3,6-2").unwrap_err();
        assert_eq!(
            err,
            ScoreError::MalformedToken {
                position: 1,
                token: "x-3".to_string()
            }
        );
    }

    #[test]
    fn test_parse_strict_rejects_trailing_comma() {
        assert!(matches!(
            parse_strict("6-4,"),
            Err(ScoreError::MalformedToken { position: 1, .. })
        ));
    }

    #[test]
    fn test_parse_strict_empty_is_error() {
        assert_eq!(parse_strict(""), Err(ScoreError::EmptyScore));
    }

    #[test]
    fn test_format_round_trip() {
        let sets = vec![
            SetScore::with_tiebreak(7, 6, TiebreakScore::new(10, 8)),
            SetScore::new(4, 6),
            SetScore::new(6, 4),
        ];
        let text = format_sets(&sets);
        assert_eq!(text, "7-6(10-8),4-6,6-4");
        assert_eq!(parse(&text), sets);
        assert_eq!(parse_strict(&text).unwrap(), sets);
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_sets(&[]), "");
    }
}
