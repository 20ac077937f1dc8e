use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// All timestamps are UTC; the validation layer normalizes inbound
/// ISO-8601 values before a Poll is ever constructed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub organizer_id: ObjectId,
    pub question: String,
    pub select_min: i64,
    pub select_max: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub options: Vec<PollOption>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

impl Poll {
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.start_time && now <= self.end_time
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }
}
