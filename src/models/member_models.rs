use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A participant an organizer can issue voting codes to. Contacts are
/// embedded: a member always has at least one, and emails are unique
/// within the member.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub organizer_id: ObjectId,
    pub name: String,
    pub group: String,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}
