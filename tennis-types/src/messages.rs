use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Match, MatchResult, MatchType, Participant, PolicyKind, SetScore};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidateScoreRequest {
    pub score: String,
    pub policy: Option<PolicyKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordMatchRequest {
    pub match_type: MatchType,
    pub side_a: Vec<Participant>,
    pub side_b: Vec<Participant>,
    pub score: String,
    pub played_on: String,
    pub notes: Option<String>,
}

/// Partial update; omitted fields keep their stored value. An empty `notes`
/// string clears the notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditMatchRequest {
    pub score: Option<String>,
    pub played_on: Option<String>,
    pub notes: Option<String>,
}

/// A stored match with its sets and result derived on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchView {
    #[serde(rename = "match")]
    pub record: Match,
    pub sets: Vec<SetScore>,
    pub result: MatchResult,
}
