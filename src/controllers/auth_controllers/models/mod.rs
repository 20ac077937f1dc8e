use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::organizer_models::Organizer;

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct OrganizerResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Organizer> for OrganizerResponse {
    fn from(organizer: Organizer) -> Self {
        Self {
            id: organizer.id.to_hex(),
            username: organizer.username,
            created_at: organizer.created_at,
        }
    }
}
