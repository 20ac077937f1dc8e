use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

use crate::controllers::auth_controllers::models::{OrganizerResponse, RegisterRequest};
use crate::models::organizer_models::Organizer;
use crate::state::AppState;
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::validation::FieldErrors;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let username = payload.username.trim().to_string();
    let mut errors = FieldErrors::new();
    if username.is_empty() {
        errors.set("username", "The username must be a valid string");
    }
    if payload.password.len() < 8 {
        errors.set("password", "The password must be at least 8 characters");
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state
        .store
        .find_organizer_by_username(&username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("This username is already taken".to_string()));
    }

    let organizer = Organizer {
        id: ObjectId::new(),
        username,
        password_hash: bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)?,
        created_at: Utc::now(),
    };

    state.store.insert_organizer(&organizer).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "organizer": OrganizerResponse::from(organizer) }
        })),
    ))
}
