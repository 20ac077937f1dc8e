use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::VoteResponse;
use crate::middleware::identity::Identity;
use crate::ops::vote_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_votes(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    let votes: Vec<VoteResponse> = vote_ops::list_votes(&state.store, organizer_id, &poll_id)
        .await?
        .into_iter()
        .map(VoteResponse::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "data": { "votes": votes }
    })))
}
