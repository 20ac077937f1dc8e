use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::{PollResponse, PollsQuery};
use crate::middleware::identity::Identity;
use crate::ops::poll_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Without a query, lists the calling organizer's polls. With `?code=`,
/// resolves the poll an anonymous voter's code belongs to.
pub async fn get_polls(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<PollsQuery>,
) -> AppResult<Json<Value>> {
    if let Some(code) = query.code.as_deref() {
        let poll = poll_ops::find_poll_by_code(&state.store, code).await?;
        return Ok(Json(json!({
            "status": "success",
            "data": { "poll": PollResponse::from(poll) }
        })));
    }

    let organizer_id = identity.require_organizer()?;
    let polls: Vec<PollResponse> = poll_ops::list_polls(&state.store, organizer_id)
        .await?
        .into_iter()
        .map(PollResponse::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "data": { "polls": polls }
    })))
}
