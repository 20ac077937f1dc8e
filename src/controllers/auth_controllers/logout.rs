use axum::{
    http::header::{HeaderValue, SET_COOKIE},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::error::{AppError, AppResult};

pub async fn logout() -> AppResult<Response> {
    let cookie = "token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

    let mut response = Json(json!({
        "status": "success",
        "data": null
    }))
    .into_response();

    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(cookie)
            .map_err(|e| AppError::Internal(format!("Failed to build cookie: {}", e)))?,
    );

    Ok(response)
}
