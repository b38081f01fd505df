use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::config::Config;
use crate::match_store::{MatchStore, MatchStoreError};
use tennis_core::{ClubRanking, CompletionPolicyFactory, validate_score};
use tennis_types::{EditMatchRequest, MatchView, RecordMatchRequest, ValidateScoreRequest};

pub mod config;
pub mod match_store;

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Deserialize)]
struct RankingQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct ErrorResponse<T: Serialize> {
    error: String,
    details: Option<T>,
}

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(message: &str, status: StatusCode) -> JsonReply {
    json_reply(
        &serde_json::json!({
            "error": message
        }),
        status,
    )
}

fn store_error_reply(err: MatchStoreError) -> JsonReply {
    match err {
        MatchStoreError::InvalidScore(score_error) => json_reply(
            &ErrorResponse {
                error: score_error.to_string(),
                details: Some(score_error),
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        MatchStoreError::InvalidRoster { .. } | MatchStoreError::InvalidDate(_) => {
            error_reply(&err.to_string(), StatusCode::BAD_REQUEST)
        }
        MatchStoreError::MatchNotFound => error_reply(&err.to_string(), StatusCode::NOT_FOUND),
        MatchStoreError::NotAParticipant => error_reply(&err.to_string(), StatusCode::FORBIDDEN),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid, JsonReply> {
    Uuid::parse_str(raw)
        .map_err(|_| error_reply(&format!("Invalid {} format", what), StatusCode::BAD_REQUEST))
}

/// Identity of the caller. Authentication happens upstream; this service only
/// needs to know which player is acting.
fn parse_player_header(header: Option<String>) -> Result<Uuid, JsonReply> {
    match header {
        Some(raw) => parse_id(raw.trim(), "player ID"),
        None => Err(error_reply(
            "Player identification required",
            StatusCode::UNAUTHORIZED,
        )),
    }
}

pub fn create_routes(
    match_store: Arc<MatchStore>,
    config: Config,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let match_store_filter = warp::any().map({
        let match_store = match_store.clone();
        move || match_store.clone()
    });

    let config_filter = warp::any().map({
        let config = Arc::new(config);
        move || config.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Score validation, no state involved
    let validate = warp::path!("scores" / "validate")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(config_filter.clone())
        .and_then(handle_validate_score);

    let record_match = warp::path!("clubs" / String / "matches")
        .and(warp::post())
        .and(warp::header::optional::<String>("x-player-id"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(match_store_filter.clone())
        .and_then(handle_record_match);

    let list_matches = warp::path!("clubs" / String / "matches")
        .and(warp::get())
        .and(match_store_filter.clone())
        .and_then(handle_list_matches);

    let edit_match = warp::path!("clubs" / String / "matches" / String)
        .and(warp::put())
        .and(warp::header::optional::<String>("x-player-id"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(match_store_filter.clone())
        .and_then(handle_edit_match);

    let remove_match = warp::path!("clubs" / String / "matches" / String)
        .and(warp::delete())
        .and(warp::header::optional::<String>("x-player-id"))
        .and(match_store_filter.clone())
        .and_then(handle_remove_match);

    let player_stats = warp::path!("clubs" / String / "players" / String / "stats")
        .and(warp::get())
        .and(match_store_filter.clone())
        .and(config_filter.clone())
        .and_then(handle_player_stats);

    let rankings = warp::path!("clubs" / String / "rankings")
        .and(warp::get())
        .and(warp::query::<RankingQuery>())
        .and(match_store_filter.clone())
        .and(config_filter.clone())
        .and_then(handle_rankings);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "x-player-id"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(validate)
        .or(record_match)
        .or(list_matches)
        .or(edit_match)
        .or(remove_match)
        .or(player_stats)
        .or(rankings)
        .with(cors)
        .with(warp::log("tennis_server"))
}

async fn handle_validate_score(
    request: ValidateScoreRequest,
    config: Arc<Config>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let policy =
        CompletionPolicyFactory::create_policy(request.policy.unwrap_or(config.completion_policy));

    match validate_score(&request.score, policy.as_ref()) {
        Ok(validated) => Ok(json_reply(&validated, StatusCode::OK)),
        Err(err) => Ok(json_reply(
            &ErrorResponse {
                error: err.to_string(),
                details: Some(err),
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        )),
    }
}

async fn handle_record_match(
    club_id: String,
    player_header: Option<String>,
    request: RecordMatchRequest,
    match_store: Arc<MatchStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let club_id = match parse_id(&club_id, "club ID") {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };
    let recorded_by = match parse_player_header(player_header) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    let record = match match_store.record_match(club_id, recorded_by, request) {
        Ok(record) => record,
        Err(err) => return Ok(store_error_reply(err)),
    };

    match match_store.view(record) {
        Ok(view) => Ok(json_reply(&view, StatusCode::CREATED)),
        Err(err) => {
            tracing::error!("Stored match failed to re-validate: {}", err);
            Ok(error_reply(
                "Failed to read back match",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_list_matches(
    club_id: String,
    match_store: Arc<MatchStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let club_id = match parse_id(&club_id, "club ID") {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    let views: Vec<MatchView> = match_store
        .club_matches(club_id)
        .into_iter()
        .filter_map(|record| {
            let match_id = record.id;
            match match_store.view(record) {
                Ok(view) => Some(view),
                Err(err) => {
                    tracing::warn!("Leaving out match {} with invalid score: {}", match_id, err);
                    None
                }
            }
        })
        .collect();

    Ok(json_reply(&views, StatusCode::OK))
}

async fn handle_edit_match(
    club_id: String,
    match_id: String,
    player_header: Option<String>,
    request: EditMatchRequest,
    match_store: Arc<MatchStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let ids = parse_id(&club_id, "club ID").and_then(|club| {
        parse_id(&match_id, "match ID").map(|m| (club, m))
    });
    let (club_id, match_id) = match ids {
        Ok(ids) => ids,
        Err(reply) => return Ok(reply),
    };
    let editor = match parse_player_header(player_header) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    let record = match match_store.edit_match(club_id, match_id, editor, request) {
        Ok(record) => record,
        Err(err) => return Ok(store_error_reply(err)),
    };

    match match_store.view(record) {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Edited match failed to re-validate: {}", err);
            Ok(error_reply(
                "Failed to read back match",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_remove_match(
    club_id: String,
    match_id: String,
    player_header: Option<String>,
    match_store: Arc<MatchStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let ids = parse_id(&club_id, "club ID").and_then(|club| {
        parse_id(&match_id, "match ID").map(|m| (club, m))
    });
    let (club_id, match_id) = match ids {
        Ok(ids) => ids,
        Err(reply) => return Ok(reply),
    };
    let requested_by = match parse_player_header(player_header) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match match_store.remove_match(club_id, match_id, requested_by) {
        Ok(record) => Ok(json_reply(&record, StatusCode::OK)),
        Err(err) => Ok(store_error_reply(err)),
    }
}

async fn handle_player_stats(
    club_id: String,
    player_id: String,
    match_store: Arc<MatchStore>,
    config: Arc<Config>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let ids = parse_id(&club_id, "club ID").and_then(|club| {
        parse_id(&player_id, "player ID").map(|p| (club, p))
    });
    let (club_id, player_id) = match ids {
        Ok(ids) => ids,
        Err(reply) => return Ok(reply),
    };

    let matches = match_store.club_matches(club_id);
    let stats = config.stats_aggregator().aggregate(&matches, player_id);

    Ok(json_reply(&stats, StatusCode::OK))
}

async fn handle_rankings(
    club_id: String,
    query: RankingQuery,
    match_store: Arc<MatchStore>,
    config: Arc<Config>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let club_id = match parse_id(&club_id, "club ID") {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };
    let limit = config.ranking_limit(query.limit);

    let matches = match_store.club_matches(club_id);
    let ranking = ClubRanking::from_matches(
        &matches,
        &config.stats_aggregator(),
        &config.ranking_weights(),
    );

    Ok(json_reply(&ranking.top(limit), StatusCode::OK))
}
