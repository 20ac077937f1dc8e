use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::poll_models::Poll;
use crate::models::vote_models::Vote;
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::validation::FieldErrors;

/// Casts an anonymous vote. The checks run in a fixed order: poll
/// existence, poll window, code validity, then option validity — the
/// code gates the options, because options cannot be trusted without a
/// confirmed poll/code pairing. Redeeming the code and inserting the
/// vote is atomic with respect to concurrent casts of the same code.
pub async fn cast_vote<S: Store>(
    store: &S,
    poll_id: &str,
    body: &Value,
    now: DateTime<Utc>,
) -> AppResult<Vote> {
    let poll_id = ObjectId::parse_str(poll_id)
        .map_err(|_| AppError::NotFound("Poll not found".to_string()))?;
    let poll = store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    if now < poll.start_time {
        return Err(AppError::Business("This poll is not open yet".to_string()));
    }
    if now > poll.end_time {
        return Err(AppError::Business("This poll is no longer open".to_string()));
    }

    let token = body
        .get("code")
        .and_then(Value::as_str)
        .ok_or_else(|| FieldErrors::single("code", "The voting code must be a valid string"))?;
    let code = store
        .find_code_by_token(token)
        .await?
        .filter(|code| code.poll_id == poll.id)
        .ok_or_else(|| FieldErrors::single("code", "This voting code is invalid"))?;
    if code.spent {
        return Err(
            FieldErrors::single("code", "This voting code has already been used").into(),
        );
    }

    let option_ids = validate_option_selection(&poll, body)?;

    // The compare-and-set below loses against a concurrent cast that got
    // here first with the same code.
    if !store.redeem_code(code.id).await? {
        return Err(
            FieldErrors::single("code", "This voting code has already been used").into(),
        );
    }

    let vote = Vote {
        id: ObjectId::new(),
        poll_id: poll.id,
        member_id: code.member_id,
        code_id: code.id,
        option_ids,
        time: now,
    };

    if let Err(err) = store.insert_vote(&vote).await {
        // Hand the code back rather than burning it on a storage fault.
        let _ = store.release_code(code.id).await;
        return Err(err);
    }

    Ok(vote)
}

pub async fn list_votes<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
) -> AppResult<Vec<Vote>> {
    let poll = crate::ops::poll_ops::resolve_owned_poll(store, organizer_id, poll_id).await?;
    store.list_votes_for_poll(poll.id).await
}

fn validate_option_selection(poll: &Poll, body: &Value) -> Result<Vec<String>, FieldErrors> {
    let items = match body.get("options") {
        Some(Value::Array(items)) => items,
        _ => return Err(FieldErrors::single("options", "Options must be provided in a list")),
    };

    let mut option_ids = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(id) => option_ids.push(id.to_string()),
            None => {
                return Err(FieldErrors::single(
                    "options",
                    "The options must be a list of valid option ids",
                ))
            }
        }
    }

    // A vote always selects something, even when select_min is 0.
    let minimum = poll.select_min.max(1);
    if (option_ids.len() as i64) < minimum {
        return Err(FieldErrors::single(
            "options",
            format!("There must be at least {} options", minimum),
        ));
    }
    if (option_ids.len() as i64) > poll.select_max {
        return Err(FieldErrors::single(
            "options",
            format!("There can at most be {} options", poll.select_max),
        ));
    }

    for (index, id) in option_ids.iter().enumerate() {
        if option_ids[..index].contains(id) {
            return Err(FieldErrors::single("options", "The options must be unique"));
        }
    }

    if !option_ids.iter().all(|id| poll.has_option(id)) {
        return Err(FieldErrors::single(
            "options",
            "One or more options are invalid",
        ));
    }

    Ok(option_ids)
}
