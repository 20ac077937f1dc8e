//! In-memory store for lifecycle tests. The mutex gives the same
//! atomicity for redeem_code that MongoDB's single-document update does.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use super::Store;
use crate::models::code_models::Code;
use crate::models::member_models::Member;
use crate::models::organizer_models::Organizer;
use crate::models::poll_models::Poll;
use crate::models::vote_models::Vote;
use crate::utils::error::AppResult;

#[derive(Default)]
struct Inner {
    organizers: Vec<Organizer>,
    members: Vec<Member>,
    polls: Vec<Poll>,
    codes: Vec<Code>,
    votes: Vec<Vote>,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        f(&mut self.inner.lock().unwrap())
    }
}

#[async_trait]
impl Store for MemStore {
    async fn insert_organizer(&self, organizer: &Organizer) -> AppResult<()> {
        self.with(|inner| inner.organizers.push(organizer.clone()));
        Ok(())
    }

    async fn find_organizer_by_username(&self, username: &str) -> AppResult<Option<Organizer>> {
        Ok(self.with(|inner| {
            inner
                .organizers
                .iter()
                .find(|organizer| organizer.username == username)
                .cloned()
        }))
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.with(|inner| inner.polls.push(poll.clone()));
        Ok(())
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.with(|inner| inner.polls.iter().find(|poll| poll.id == poll_id).cloned()))
    }

    async fn find_poll_for_organizer(
        &self,
        poll_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Poll>> {
        Ok(self.with(|inner| {
            inner
                .polls
                .iter()
                .find(|poll| poll.id == poll_id && poll.organizer_id == organizer_id)
                .cloned()
        }))
    }

    async fn list_polls(&self, organizer_id: ObjectId) -> AppResult<Vec<Poll>> {
        Ok(self.with(|inner| {
            inner
                .polls
                .iter()
                .filter(|poll| poll.organizer_id == organizer_id)
                .cloned()
                .collect()
        }))
    }

    async fn replace_poll(&self, poll: &Poll) -> AppResult<()> {
        self.with(|inner| {
            if let Some(existing) = inner.polls.iter_mut().find(|p| p.id == poll.id) {
                *existing = poll.clone();
            }
        });
        Ok(())
    }

    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.polls.retain(|poll| poll.id != poll_id));
        Ok(())
    }

    async fn poll_has_votes(&self, poll_id: ObjectId) -> AppResult<bool> {
        Ok(self.with(|inner| inner.votes.iter().any(|vote| vote.poll_id == poll_id)))
    }

    async fn insert_member(&self, member: &Member) -> AppResult<()> {
        self.with(|inner| inner.members.push(member.clone()));
        Ok(())
    }

    async fn find_member_for_organizer(
        &self,
        member_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Member>> {
        Ok(self.with(|inner| {
            inner
                .members
                .iter()
                .find(|member| member.id == member_id && member.organizer_id == organizer_id)
                .cloned()
        }))
    }

    async fn list_members(&self, organizer_id: ObjectId) -> AppResult<Vec<Member>> {
        Ok(self.with(|inner| {
            inner
                .members
                .iter()
                .filter(|member| member.organizer_id == organizer_id)
                .cloned()
                .collect()
        }))
    }

    async fn replace_member(&self, member: &Member) -> AppResult<()> {
        self.with(|inner| {
            if let Some(existing) = inner.members.iter_mut().find(|m| m.id == member.id) {
                *existing = member.clone();
            }
        });
        Ok(())
    }

    async fn delete_member(&self, member_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.members.retain(|member| member.id != member_id));
        Ok(())
    }

    async fn insert_code(&self, code: &Code) -> AppResult<()> {
        self.with(|inner| inner.codes.push(code.clone()));
        Ok(())
    }

    async fn find_code_by_token(&self, token: &str) -> AppResult<Option<Code>> {
        Ok(self.with(|inner| inner.codes.iter().find(|code| code.token == token).cloned()))
    }

    async fn token_exists(&self, token: &str) -> AppResult<bool> {
        Ok(self.with(|inner| inner.codes.iter().any(|code| code.token == token)))
    }

    async fn list_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Code>> {
        Ok(self.with(|inner| {
            inner
                .codes
                .iter()
                .filter(|code| code.poll_id == poll_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_code(&self, code_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.codes.retain(|code| code.id != code_id));
        Ok(())
    }

    async fn delete_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.codes.retain(|code| code.poll_id != poll_id));
        Ok(())
    }

    async fn delete_codes_for_member(&self, member_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.codes.retain(|code| code.member_id != member_id));
        Ok(())
    }

    async fn redeem_code(&self, code_id: ObjectId) -> AppResult<bool> {
        Ok(self.with(|inner| {
            match inner
                .codes
                .iter_mut()
                .find(|code| code.id == code_id && !code.spent)
            {
                Some(code) => {
                    code.spent = true;
                    true
                }
                None => false,
            }
        }))
    }

    async fn release_code(&self, code_id: ObjectId) -> AppResult<()> {
        self.with(|inner| {
            if let Some(code) = inner.codes.iter_mut().find(|code| code.id == code_id) {
                code.spent = false;
            }
        });
        Ok(())
    }

    async fn insert_vote(&self, vote: &Vote) -> AppResult<()> {
        self.with(|inner| inner.votes.push(vote.clone()));
        Ok(())
    }

    async fn list_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>> {
        Ok(self.with(|inner| {
            inner
                .votes
                .iter()
                .filter(|vote| vote.poll_id == poll_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.with(|inner| inner.votes.retain(|vote| vote.poll_id != poll_id));
        Ok(())
    }
}
