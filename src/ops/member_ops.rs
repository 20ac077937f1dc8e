use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::member_models::{Contact, Member};
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::validation::member::validate_member;

pub async fn create_member<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    body: &Value,
) -> AppResult<Member> {
    let draft = validate_member(body)?;

    let member = Member {
        id: ObjectId::new(),
        organizer_id,
        name: draft.name,
        group: draft.group,
        contacts: draft
            .contacts
            .into_iter()
            .map(|contact| Contact {
                name: contact.name,
                email: contact.email,
            })
            .collect(),
    };

    store.insert_member(&member).await?;
    Ok(member)
}

pub async fn get_member<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    member_id: &str,
) -> AppResult<Member> {
    resolve_owned_member(store, organizer_id, member_id).await
}

pub async fn list_members<S: Store>(store: &S, organizer_id: ObjectId) -> AppResult<Vec<Member>> {
    store.list_members(organizer_id).await
}

pub async fn update_member<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    member_id: &str,
    body: &Value,
) -> AppResult<Member> {
    let existing = resolve_owned_member(store, organizer_id, member_id).await?;
    let draft = validate_member(body)?;

    let updated = Member {
        id: existing.id,
        organizer_id: existing.organizer_id,
        name: draft.name,
        group: draft.group,
        contacts: draft
            .contacts
            .into_iter()
            .map(|contact| Contact {
                name: contact.name,
                email: contact.email,
            })
            .collect(),
    };

    store.replace_member(&updated).await?;
    Ok(updated)
}

/// Removes the member and any codes issued to them. Votes already cast
/// with those codes stay: a vote is a record, not a relationship.
pub async fn delete_member<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    member_id: &str,
) -> AppResult<()> {
    let member = resolve_owned_member(store, organizer_id, member_id).await?;

    store.delete_codes_for_member(member.id).await?;
    store.delete_member(member.id).await?;
    Ok(())
}

async fn resolve_owned_member<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    member_id: &str,
) -> AppResult<Member> {
    let member_id = ObjectId::parse_str(member_id)
        .map_err(|_| AppError::NotFound("Member not found".to_string()))?;
    store
        .find_member_for_organizer(member_id, organizer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
}
