use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single-use voting credential for one (poll, member) pair. The token
/// is globally unique; `spent` flips to true exactly once, atomically
/// with the insertion of the vote that redeems it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Code {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub poll_id: ObjectId,
    pub member_id: ObjectId,
    pub token: String,
    pub spent: bool,
    pub created_at: DateTime<Utc>,
}
