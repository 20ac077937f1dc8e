use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::CodeResponse;
use crate::middleware::identity::Identity;
use crate::ops::code_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_codes(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Value>> {
    let organizer_id = identity.require_organizer()?;

    let codes: Vec<CodeResponse> = code_ops::list_codes(&state.store, organizer_id, &poll_id)
        .await?
        .into_iter()
        .map(CodeResponse::from)
        .collect();

    Ok(Json(json!({
        "status": "success",
        "data": { "codes": codes }
    })))
}
