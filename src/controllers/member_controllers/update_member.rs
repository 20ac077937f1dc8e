use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::member_controllers::models::MemberResponse;
use crate::middleware::identity::Identity;
use crate::ops::member_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn update_member(
    Path(member_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    let member =
        member_ops::update_member(&state.store, organizer_id, &member_id, &payload).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "member": MemberResponse::from(member) }
    })))
}
