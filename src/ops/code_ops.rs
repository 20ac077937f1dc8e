use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::code_models::Code;
use crate::models::member_models::Member;
use crate::store::Store;
use crate::utils::error::{AppError, AppResult};
use crate::utils::token::generate_code_token;
use crate::validation::FieldErrors;

/// Issues one fresh single-use code per member for the given poll.
/// All-or-nothing: every member id must resolve to a member of the same
/// organizer before anything is persisted.
pub async fn issue_codes<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
    body: &Value,
    now: DateTime<Utc>,
) -> AppResult<Vec<Code>> {
    let mut errors = FieldErrors::new();

    let poll = match ObjectId::parse_str(poll_id) {
        Ok(id) => store.find_poll_for_organizer(id, organizer_id).await?,
        Err(_) => None,
    };
    if poll.is_none() {
        errors.set("poll_id", "This poll does not exist");
    }

    let members = resolve_members(store, organizer_id, body, &mut errors).await?;

    match (poll, members) {
        (Some(poll), Some(members)) if errors.is_empty() => {
            let mut created: Vec<Code> = Vec::with_capacity(members.len());
            for member in &members {
                let token = fresh_token(store).await?;
                let code = Code {
                    id: ObjectId::new(),
                    poll_id: poll.id,
                    member_id: member.id,
                    token,
                    spent: false,
                    created_at: now,
                };
                if let Err(err) = store.insert_code(&code).await {
                    // Keep the batch all-or-nothing on storage failure.
                    for rolled_back in &created {
                        let _ = store.delete_code(rolled_back.id).await;
                    }
                    return Err(err);
                }
                created.push(code);
            }
            Ok(created)
        }
        _ => Err(AppError::Validation(errors)),
    }
}

/// Lists a poll's codes so the organizer can distribute them.
pub async fn list_codes<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    poll_id: &str,
) -> AppResult<Vec<Code>> {
    let poll = crate::ops::poll_ops::resolve_owned_poll(store, organizer_id, poll_id).await?;
    store.list_codes_for_poll(poll.id).await
}

async fn resolve_members<S: Store>(
    store: &S,
    organizer_id: ObjectId,
    body: &Value,
    errors: &mut FieldErrors,
) -> AppResult<Option<Vec<Member>>> {
    let items = match body.get("member_ids") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            errors.set("member_ids", "There must be at least one member id");
            return Ok(None);
        }
    };

    let mut members = Vec::with_capacity(items.len());
    for item in items {
        let resolved = match item.as_str().and_then(|raw| ObjectId::parse_str(raw).ok()) {
            Some(member_id) => {
                store
                    .find_member_for_organizer(member_id, organizer_id)
                    .await?
            }
            None => None,
        };
        match resolved {
            Some(member) => members.push(member),
            None => {
                // One bad id fails the whole batch.
                errors.set("member_ids", "One or more member ids are invalid");
                return Ok(None);
            }
        }
    }

    Ok(Some(members))
}

/// Tokens are globally unique; regenerate until the candidate is free.
/// The unique index on the token column backs this up against races.
async fn fresh_token<S: Store>(store: &S) -> AppResult<String> {
    loop {
        let candidate = generate_code_token();
        if !store.token_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{member_ops, poll_ops};
    use crate::store::memory::MemStore;
    use chrono::Duration;
    use serde_json::json;
    use std::collections::HashSet;

    fn poll_body(now: DateTime<Utc>) -> Value {
        json!({
            "question": "Is this a question?",
            "select_min": 1,
            "select_max": 1,
            "start_time": (now + Duration::seconds(1)).to_rfc3339(),
            "end_time": (now + Duration::days(1)).to_rfc3339(),
            "options": ["Yes", "No", "Abstain"],
        })
    }

    fn member_body(name: &str) -> Value {
        json!({
            "name": name,
            "group": "Telekom",
            "contacts": [{ "name": name, "email": format!("{}@example.com", name) }],
        })
    }

    #[tokio::test]
    async fn issued_codes_are_distinct_and_bound_to_their_pair() {
        let store = MemStore::new();
        let organizer_id = ObjectId::new();
        let now = Utc::now();

        let poll = poll_ops::create_poll(&store, organizer_id, &poll_body(now), now)
            .await
            .unwrap();

        let mut member_ids = Vec::new();
        for i in 0..10 {
            let member =
                member_ops::create_member(&store, organizer_id, &member_body(&format!("m{}", i)))
                    .await
                    .unwrap();
            member_ids.push(member.id);
        }

        let body = json!({
            "member_ids": member_ids.iter().map(|id| id.to_hex()).collect::<Vec<_>>(),
        });
        let codes = issue_codes(&store, organizer_id, &poll.id.to_hex(), &body, now)
            .await
            .unwrap();

        assert_eq!(codes.len(), 10);
        let tokens: HashSet<&str> = codes.iter().map(|code| code.token.as_str()).collect();
        assert_eq!(tokens.len(), 10);

        for (code, member_id) in codes.iter().zip(&member_ids) {
            assert_eq!(code.poll_id, poll.id);
            assert_eq!(code.member_id, *member_id);
            assert!(!code.spent);
            let resolved = store.find_code_by_token(&code.token).await.unwrap().unwrap();
            assert_eq!(resolved.member_id, *member_id);
        }
    }

    #[tokio::test]
    async fn one_bad_member_id_fails_the_whole_batch() {
        let store = MemStore::new();
        let organizer_id = ObjectId::new();
        let now = Utc::now();

        let poll = poll_ops::create_poll(&store, organizer_id, &poll_body(now), now)
            .await
            .unwrap();
        let member = member_ops::create_member(&store, organizer_id, &member_body("m"))
            .await
            .unwrap();

        let body = json!({
            "member_ids": [member.id.to_hex(), ObjectId::new().to_hex()],
        });
        let err = issue_codes(&store, organizer_id, &poll.id.to_hex(), &body, now)
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => assert!(errors.contains("member_ids")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.list_codes_for_poll(poll.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_members_do_not_resolve() {
        let store = MemStore::new();
        let organizer_id = ObjectId::new();
        let now = Utc::now();

        let poll = poll_ops::create_poll(&store, organizer_id, &poll_body(now), now)
            .await
            .unwrap();
        // Member belongs to a different organizer.
        let foreign = member_ops::create_member(&store, ObjectId::new(), &member_body("m"))
            .await
            .unwrap();

        let body = json!({ "member_ids": [foreign.id.to_hex()] });
        let err = issue_codes(&store, organizer_id, &poll.id.to_hex(), &body, now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_poll_and_bad_members_are_reported_together() {
        let store = MemStore::new();
        let now = Utc::now();

        let body = json!({ "member_ids": [] });
        let err = issue_codes(&store, ObjectId::new(), "not-an-id", &body, now)
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert!(errors.contains("poll_id"));
                assert!(errors.contains("member_ids"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
