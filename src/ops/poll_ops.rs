use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::poll_models::{Poll, PollOption};
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::validation::poll::validate_poll;

pub async fn create_poll<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    body: &Value,
    now: DateTime<Utc>,
) -> AppResult<Poll> {
    let draft = validate_poll(body, now)?;

    let poll = Poll {
        id: ObjectId::new(),
        organizer_id,
        question: draft.question,
        select_min: draft.select_min,
        select_max: draft.select_max,
        start_time: draft.start_time,
        end_time: draft.end_time,
        options: draft
            .options
            .into_iter()
            .map(|text| PollOption {
                id: ObjectId::new().to_hex(),
                text,
            })
            .collect(),
        created_at: now,
    };

    store.insert_poll(&poll).await?;
    Ok(poll)
}

pub async fn get_poll<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
) -> AppResult<Poll> {
    resolve_owned_poll(store, organizer_id, poll_id).await
}

pub async fn list_polls<S: Store>(store: &S, organizer_id: ObjectId) -> AppResult<Vec<Poll>> {
    store.list_polls(organizer_id).await
}

/// Anonymous lookup: a code bearer fetches the poll their code belongs
/// to without learning anything else about the organizer's data.
pub async fn find_poll_by_code<S: Store>(store: &S, token: &str) -> AppResult<Poll> {
    let code = store
        .find_code_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;
    store
        .find_poll(code.poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
}

/// Replaces the poll definition wholesale. Frozen as soon as the first
/// vote lands: a voted-on poll and its options can never change again.
pub async fn update_poll<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
    body: &Value,
    now: DateTime<Utc>,
) -> AppResult<Poll> {
    let existing = resolve_owned_poll(store, organizer_id, poll_id).await?;

    if store.poll_has_votes(existing.id).await? {
        return Err(AppError::Business(
            "This poll already has votes and can no longer be edited".to_string(),
        ));
    }

    let draft = validate_poll(body, now)?;

    let updated = Poll {
        id: existing.id,
        organizer_id: existing.organizer_id,
        question: draft.question,
        select_min: draft.select_min,
        select_max: draft.select_max,
        start_time: draft.start_time,
        end_time: draft.end_time,
        options: draft
            .options
            .into_iter()
            .map(|text| PollOption {
                id: ObjectId::new().to_hex(),
                text,
            })
            .collect(),
        created_at: existing.created_at,
    };

    store.replace_poll(&updated).await?;
    Ok(updated)
}

/// Tears the poll down, children first: votes, then codes, then the poll
/// itself (options are embedded in the poll document).
pub async fn delete_poll<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
) -> AppResult<()> {
    let poll = resolve_owned_poll(store, organizer_id, poll_id).await?;

    store.delete_votes_for_poll(poll.id).await?;
    store.delete_codes_for_poll(poll.id).await?;
    store.delete_poll(poll.id).await?;
    Ok(())
}

/// Polls are scoped to their organizer; a poll belonging to someone else
/// is indistinguishable from one that does not exist.
pub(crate) async fn resolve_owned_poll<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
) -> AppResult<Poll> {
    let poll_id = ObjectId::parse_str(poll_id)
        .map_err(|_| AppError::NotFound("Poll not found".to_string()))?;
    store
        .find_poll_for_organizer(poll_id, organizer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
}
