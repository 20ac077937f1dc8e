use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::member_controllers::models::MemberResponse;
use crate::middleware::identity::Identity;
use crate::ops::member_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_members(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    let members: Vec<MemberResponse> = member_ops::list_members(&state.store, organizer_id)
        .await?
        .into_iter()
        .map(MemberResponse::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "data": { "members": members }
    })))
}
