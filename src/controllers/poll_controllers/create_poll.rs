use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::middleware::identity::Identity;
use crate::ops::poll_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let organizer_id = identity.require_organizer()?;

    let poll = poll_ops::create_poll(&state.store, organizer_id, &payload, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "poll": PollResponse::from(poll) }
        })),
    ))
}
