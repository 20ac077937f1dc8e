use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::controllers::poll_controllers::models::CodeResponse;
use crate::middleware::identity::Identity;
use crate::ops::code_ops;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn issue_codes(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let organizer_id = identity.require_organizer()?;

    let codes: Vec<CodeResponse> =
        code_ops::issue_codes(&state.store, organizer_id, &poll_id, &payload, Utc::now())
            .await?
            .into_iter()
            .map(CodeResponse::from)
            .collect();

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "codes": codes }
        })),
    ))
}
