use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::controllers::member_controllers::models::MemberResponse;
use crate::middleware::identity::Identity;
use crate::ops::member_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let organizer_id = identity.require_organizer()?;

    let member = member_ops::create_member(&state.store, organizer_id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "member": MemberResponse::from(member) }
        })),
    ))
}
