use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::middleware::identity::Identity;
use crate::ops::member_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn delete_member(
    Path(member_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    member_ops::delete_member(&state.store, organizer_id, &member_id).await?;

    Ok(Json(json!({ "status": "success", "data": null })))
}
