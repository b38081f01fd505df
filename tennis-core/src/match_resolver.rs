use tennis_types::{MatchResult, ScoreError, SetScore, Side};

use crate::{CompletionPolicy, MajorityOfPlayed, validate_sets};

/// Resolve with the default policy, [`MajorityOfPlayed`].
pub fn resolve(sets: &[SetScore]) -> Result<MatchResult, ScoreError> {
    resolve_with(sets, &MajorityOfPlayed)
}

/// Validate every set, then let `policy` decide completion and winner.
/// Tiebreak points never influence the result beyond confirming a 7-6 set.
pub fn resolve_with(
    sets: &[SetScore],
    policy: &dyn CompletionPolicy,
) -> Result<MatchResult, ScoreError> {
    validate_sets(sets)?;

    // Legal sets always have a game-count winner
    let set_winners: Vec<Side> = sets.iter().filter_map(SetScore::winner).collect();

    policy.evaluate(&set_winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BestOf, parse};
    use tennis_types::TiebreakScore;

    #[test]
    fn test_scenario_a_straight_sets() {
        let sets = parse("6-4,6-3");
        assert_eq!(sets, vec![SetScore::new(6, 4), SetScore::new(6, 3)]);

        let result = resolve(&sets).unwrap();
        assert_eq!(result.winner, Some(Side::A));
        assert!(result.is_complete);
        assert_eq!((result.sets_won_a, result.sets_won_b), (2, 0));
    }

    #[test]
    fn test_scenario_b_three_sets_with_tiebreak() {
        let sets = parse("7-6(7-3),4-6,6-4");
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].tiebreak, Some(TiebreakScore::new(7, 3)));

        let result = resolve(&sets).unwrap();
        assert_eq!(result.winner, Some(Side::A));
        assert_eq!((result.sets_won_a, result.sets_won_b), (2, 1));
    }

    #[test]
    fn test_scenario_c_illegal_set() {
        let sets = parse("6-8");
        assert!(matches!(
            resolve(&sets),
            Err(ScoreError::IllegalSetScore { set_number: 1, .. })
        ));
    }

    #[test]
    fn test_one_illegal_set_invalidates_match() {
        let sets = parse("6-4,6-5,6-3");
        assert!(resolve(&sets).is_err());
    }

    #[test]
    fn test_side_b_wins() {
        let result = resolve(&parse("4-6,6-7(5-7)")).unwrap();
        assert_eq!(result.winner, Some(Side::B));
    }

    #[test]
    fn test_empty_sets_undecided() {
        let result = resolve(&[]).unwrap();
        assert_eq!(result, MatchResult::undecided(0, 0));
    }

    #[test]
    fn test_resolve_is_pure() {
        let sets = parse("6-2,2-6,7-5");
        assert_eq!(resolve(&sets), resolve(&sets));
    }

    #[test]
    fn test_prefix_winner_unchanged_by_later_sets() {
        let extras = [SetScore::new(6, 3), SetScore::new(3, 6)];

        // Decided by two sets or more, so one extra set can't undo the majority
        for score in ["6-1,6-2", "4-6,6-7(5-7)", "6-0,6-0,6-0", "6-4,3-6,6-2,6-1"] {
            let sets = parse(score);
            let prefix = resolve(&sets).unwrap();
            assert!(prefix.is_complete, "{} should be complete", score);

            for extra in extras {
                let mut extended = sets.clone();
                extended.push(extra);
                let result = resolve(&extended).unwrap();
                assert_eq!(result.winner, prefix.winner, "{} then {}", score, extra);
                assert!(result.is_complete);
            }
        }

        // Under a fixed length, anything after the clinching set is rejected
        for score in ["6-1,6-2", "7-6(7-3),4-6,6-4", "3-6,6-4,2-6"] {
            let sets = parse(score);
            assert!(resolve_with(&sets, &BestOf::three()).unwrap().is_complete);

            for extra in extras {
                let mut extended = sets.clone();
                extended.push(extra);
                assert_eq!(
                    resolve_with(&extended, &BestOf::three()),
                    Err(ScoreError::SetsAfterCompletion {
                        set_number: extended.len()
                    })
                );
            }
        }
    }

    #[test]
    fn test_policy_changes_completion() {
        let sets = parse("6-4");
        assert!(resolve(&sets).unwrap().is_complete);
        assert!(!resolve_with(&sets, &BestOf::three()).unwrap().is_complete);
    }
}
