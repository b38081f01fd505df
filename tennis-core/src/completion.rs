use std::sync::Arc;
use tennis_types::{MatchResult, PolicyKind, ScoreError, Side};

/// Decides when a sequence of set winners makes a finished match.
///
/// Implementations only see legal sets; legality is checked before a policy
/// is consulted.
pub trait CompletionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, set_winners: &[Side]) -> Result<MatchResult, ScoreError>;
}

fn tally(set_winners: &[Side]) -> (u32, u32) {
    set_winners.iter().fold((0, 0), |(a, b), side| match side {
        Side::A => (a + 1, b),
        Side::B => (a, b + 1),
    })
}

/// A match is over once one side has won strictly more than half of the sets
/// recorded so far. A single decided set counts as a complete match.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityOfPlayed;

impl CompletionPolicy for MajorityOfPlayed {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn evaluate(&self, set_winners: &[Side]) -> Result<MatchResult, ScoreError> {
        let (a, b) = tally(set_winners);
        let played = set_winners.len() as u32;

        let winner = if 2 * a > played {
            Some(Side::A)
        } else if 2 * b > played {
            Some(Side::B)
        } else {
            None
        };

        Ok(match winner {
            Some(side) => MatchResult {
                winner: Some(side),
                is_complete: true,
                sets_won_a: a,
                sets_won_b: b,
            },
            None => MatchResult::undecided(a, b),
        })
    }
}

/// First side to `sets / 2 + 1` set wins takes the match. Sets recorded after
/// that point, or beyond `sets`, make the score invalid.
#[derive(Debug, Clone, Copy)]
pub struct BestOf {
    sets: u32,
}

impl BestOf {
    /// `None` unless `sets` is odd; an even length has no clinching count.
    pub fn new(sets: u32) -> Option<Self> {
        (sets % 2 == 1).then_some(Self { sets })
    }

    pub fn three() -> Self {
        Self { sets: 3 }
    }

    pub fn five() -> Self {
        Self { sets: 5 }
    }

    pub fn sets_to_win(&self) -> u32 {
        self.sets / 2 + 1
    }
}

impl CompletionPolicy for BestOf {
    fn name(&self) -> &'static str {
        match self.sets {
            3 => "best_of_3",
            5 => "best_of_5",
            _ => "best_of",
        }
    }

    fn evaluate(&self, set_winners: &[Side]) -> Result<MatchResult, ScoreError> {
        let needed = self.sets_to_win();

        for (index, _) in set_winners.iter().enumerate().skip(1) {
            let (a, b) = tally(&set_winners[..index]);
            if a >= needed || b >= needed {
                return Err(ScoreError::SetsAfterCompletion {
                    set_number: index + 1,
                });
            }
        }
        if set_winners.len() > self.sets as usize {
            return Err(ScoreError::SetsAfterCompletion {
                set_number: self.sets as usize + 1,
            });
        }

        let (a, b) = tally(set_winners);
        let winner = if a >= needed {
            Some(Side::A)
        } else if b >= needed {
            Some(Side::B)
        } else {
            None
        };

        Ok(match winner {
            Some(side) => MatchResult {
                winner: Some(side),
                is_complete: true,
                sets_won_a: a,
                sets_won_b: b,
            },
            None => MatchResult::undecided(a, b),
        })
    }
}

/// Maps a requested [`PolicyKind`] to a policy instance.
pub struct CompletionPolicyFactory;

impl CompletionPolicyFactory {
    pub fn create_policy(kind: PolicyKind) -> Arc<dyn CompletionPolicy> {
        match kind {
            PolicyKind::Majority => Arc::new(MajorityOfPlayed),
            PolicyKind::BestOfThree => Arc::new(BestOf::three()),
            PolicyKind::BestOfFive => Arc::new(BestOf::five()),
        }
    }
}
