use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::VoteResponse;
use crate::ops::vote_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Anonymous: the voting code in the body is the credential.
pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let vote = vote_ops::cast_vote(&state.store, &poll_id, &payload, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "vote": VoteResponse::from(vote) }
        })),
    ))
}
