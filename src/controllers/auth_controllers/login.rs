use axum::{
    extract::State,
    http::header::{HeaderValue, SET_COOKIE},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::controllers::auth_controllers::models::{LoginRequest, OrganizerResponse};
use crate::state::AppState;
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::{self, ROLE_ORGANIZER};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let organizer = state
        .store
        .find_organizer_by_username(payload.username.trim())
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    // Wrong password and unknown username produce the same response.
    if !bcrypt::verify(&payload.password, &organizer.password_hash)? {
        return Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        ));
    }

    let token = session::create_token(&organizer.id.to_hex(), ROLE_ORGANIZER)
        .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))?;

    let cookie = format!(
        "token={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400",
        token
    );

    let mut response = Json(json!({
        "status": "success",
        "data": {
            "organizer": OrganizerResponse::from(organizer),
            "token": token,
        }
    }))
    .into_response();

    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Failed to build cookie: {}", e)))?,
    );

    Ok(response)
}
