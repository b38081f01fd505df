use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use tennis_core::{CompletionPolicy, validate_for_submission};
use tennis_types::{
    ClubId, EditMatchRequest, Match, MatchId, MatchView, PlayerId, RecordMatchRequest,
    ScoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum MatchStoreError {
    #[error("{0}")]
    InvalidScore(#[from] ScoreError),
    #[error("Invalid match date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Each side needs {expected} participant(s) for this match type")]
    InvalidRoster { expected: usize },
    #[error("Match not found")]
    MatchNotFound,
    #[error("Only participants of the match may change it")]
    NotAParticipant,
}

/// Parse a play date and return it zero-padded, so stored dates order
/// correctly as text.
fn normalize_played_on(raw: &str) -> Result<String, MatchStoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| MatchStoreError::InvalidDate(raw.to_string()))
}

/// Blank notes clear the stored value.
fn normalize_notes(notes: String) -> Option<String> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// In-memory match records, grouped by club.
///
/// Every stored score has passed submission validation under the store's
/// policy, so sets and results can always be derived from it.
pub struct MatchStore {
    clubs: DashMap<ClubId, Vec<Match>>,
    policy: Arc<dyn CompletionPolicy>,
}

impl MatchStore {
    pub fn new(policy: Arc<dyn CompletionPolicy>) -> Self {
        Self {
            clubs: DashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &dyn CompletionPolicy {
        self.policy.as_ref()
    }

    pub fn record_match(
        &self,
        club_id: ClubId,
        recorded_by: PlayerId,
        request: RecordMatchRequest,
    ) -> Result<Match, MatchStoreError> {
        let played_on = normalize_played_on(&request.played_on)?;
        let now = chrono::Utc::now().to_rfc3339();
        let record = Match {
            id: Uuid::new_v4(),
            club_id,
            match_type: request.match_type,
            side_a: request.side_a,
            side_b: request.side_b,
            score: request.score.trim().to_string(),
            played_on,
            notes: request.notes.and_then(normalize_notes),
            recorded_by,
            created_at: now.clone(),
            updated_at: now,
        };

        if !record.has_valid_roster() {
            return Err(MatchStoreError::InvalidRoster {
                expected: record.match_type.side_size(),
            });
        }
        if !record.is_participant(recorded_by) {
            return Err(MatchStoreError::NotAParticipant);
        }
        validate_for_submission(&record.score, self.policy())?;

        info!(
            "Recorded {:?} match {} in club {}: {}",
            record.match_type, record.id, club_id, record.score
        );
        self.clubs.entry(club_id).or_default().push(record.clone());

        Ok(record)
    }

    /// Apply an edit from `editor`, who must be a registered participant.
    /// A new score goes through the same validation as a submission; empty
    /// notes remove the existing ones.
    pub fn edit_match(
        &self,
        club_id: ClubId,
        match_id: MatchId,
        editor: PlayerId,
        request: EditMatchRequest,
    ) -> Result<Match, MatchStoreError> {
        let mut matches = self
            .clubs
            .get_mut(&club_id)
            .ok_or(MatchStoreError::MatchNotFound)?;
        let record = matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(MatchStoreError::MatchNotFound)?;

        if !record.is_participant(editor) {
            return Err(MatchStoreError::NotAParticipant);
        }

        // Check everything before touching the record
        let score = match &request.score {
            Some(score) => {
                let score = score.trim();
                validate_for_submission(score, self.policy())?;
                Some(score.to_string())
            }
            None => None,
        };
        let played_on = request
            .played_on
            .as_deref()
            .map(normalize_played_on)
            .transpose()?;

        if let Some(score) = score {
            record.score = score;
        }
        if let Some(played_on) = played_on {
            record.played_on = played_on;
        }
        if let Some(notes) = request.notes {
            record.notes = normalize_notes(notes);
        }
        record.updated_at = chrono::Utc::now().to_rfc3339();

        info!("Match {} edited by {}", match_id, editor);
        Ok(record.clone())
    }

    pub fn remove_match(
        &self,
        club_id: ClubId,
        match_id: MatchId,
        requested_by: PlayerId,
    ) -> Result<Match, MatchStoreError> {
        let mut matches = self
            .clubs
            .get_mut(&club_id)
            .ok_or(MatchStoreError::MatchNotFound)?;
        let index = matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(MatchStoreError::MatchNotFound)?;

        if !matches[index].is_participant(requested_by) {
            return Err(MatchStoreError::NotAParticipant);
        }

        info!("Match {} removed by {}", match_id, requested_by);
        Ok(matches.remove(index))
    }

    pub fn get_match(&self, club_id: ClubId, match_id: MatchId) -> Option<Match> {
        self.clubs
            .get(&club_id)
            .and_then(|matches| matches.iter().find(|m| m.id == match_id).cloned())
    }

    /// Snapshot of a club's matches in recording order.
    pub fn club_matches(&self, club_id: ClubId) -> Vec<Match> {
        self.clubs
            .get(&club_id)
            .map(|matches| matches.value().clone())
            .unwrap_or_default()
    }

    /// Derive sets and result for a stored match.
    pub fn view(&self, record: Match) -> Result<MatchView, ScoreError> {
        let validated = tennis_core::validate_score(&record.score, self.policy())?;
        Ok(MatchView {
            record,
            sets: validated.sets,
            result: validated.result,
        })
    }

    pub fn match_count(&self) -> usize {
        self.clubs.iter().map(|entry| entry.value().len()).sum()
    }
}
