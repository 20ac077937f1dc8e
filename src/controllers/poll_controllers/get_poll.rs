use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::middleware::identity::Identity;
use crate::ops::poll_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    let poll = poll_ops::get_poll(&state.store, organizer_id, &poll_id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "poll": PollResponse::from(poll) }
    })))
}
