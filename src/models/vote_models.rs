use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An immutable record of a redeemed code. Never updated or deleted
/// through the API; removed only when its poll is torn down.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub poll_id: ObjectId,
    pub member_id: ObjectId,
    pub code_id: ObjectId,
    pub option_ids: Vec<String>,
    pub time: DateTime<Utc>,
}
