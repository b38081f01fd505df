#![allow(dead_code)]

use tennis_types::{ClubId, Match, MatchType, Participant, PlayerId};
use uuid::Uuid;

/// Creates a registered participant for a fresh player id
pub fn create_test_player() -> PlayerId {
    Uuid::new_v4()
}

pub fn registered(player_id: PlayerId) -> Participant {
    Participant::Registered { player_id }
}

pub fn guest(name: &str) -> Participant {
    Participant::Guest {
        name: name.to_string(),
    }
}

/// Creates a match with the given sides and score, played on `played_on`
pub fn create_match(
    club_id: ClubId,
    match_type: MatchType,
    side_a: Vec<Participant>,
    side_b: Vec<Participant>,
    score: &str,
    played_on: &str,
) -> Match {
    let recorded_by = side_a
        .iter()
        .find_map(Participant::player_id)
        .unwrap_or_else(Uuid::new_v4);

    Match {
        id: Uuid::new_v4(),
        club_id,
        match_type,
        side_a,
        side_b,
        score: score.to_string(),
        played_on: played_on.to_string(),
        notes: None,
        recorded_by,
        created_at: format!("{}T12:00:00Z", played_on),
        updated_at: format!("{}T12:00:00Z", played_on),
    }
}

/// Singles match between two registered players
pub fn create_singles(a: PlayerId, b: PlayerId, score: &str, played_on: &str) -> Match {
    create_match(
        Uuid::nil(),
        MatchType::Singles,
        vec![registered(a)],
        vec![registered(b)],
        score,
        played_on,
    )
}

/// Doubles match between two registered pairs
pub fn create_doubles(
    pair_a: (PlayerId, PlayerId),
    pair_b: (PlayerId, PlayerId),
    score: &str,
    played_on: &str,
) -> Match {
    create_match(
        Uuid::nil(),
        MatchType::Doubles,
        vec![registered(pair_a.0), registered(pair_a.1)],
        vec![registered(pair_b.0), registered(pair_b.1)],
        score,
        played_on,
    )
}

/// `count` straight-sets wins for `winner` over fresh opponents, one per day
pub fn create_winning_streak(winner: PlayerId, count: usize, start_day: u32) -> Vec<Match> {
    (0..count)
        .map(|i| {
            create_singles(
                winner,
                create_test_player(),
                "6-2,6-3",
                &format!("2024-03-{:02}", start_day + i as u32),
            )
        })
        .collect()
}
