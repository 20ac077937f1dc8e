use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use super::Store;
use crate::models::code_models::Code;
use crate::models::member_models::Member;
use crate::models::organizer_models::Organizer;
use crate::models::poll_models::Poll;
use crate::models::vote_models::Vote;
use crate::utils::error::AppResult;

pub const ORGANIZERS: &str = "organizers";
pub const MEMBERS: &str = "members";
pub const POLLS: &str = "polls";
pub const CODES: &str = "codes";
pub const VOTES: &str = "votes";

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn organizers(&self) -> Collection<Organizer> {
        self.db.collection(ORGANIZERS)
    }

    fn members(&self) -> Collection<Member> {
        self.db.collection(MEMBERS)
    }

    fn polls(&self) -> Collection<Poll> {
        self.db.collection(POLLS)
    }

    fn codes(&self) -> Collection<Code> {
        self.db.collection(CODES)
    }

    fn votes(&self) -> Collection<Vote> {
        self.db.collection(VOTES)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_organizer(&self, organizer: &Organizer) -> AppResult<()> {
        self.organizers().insert_one(organizer).await?;
        Ok(())
    }

    async fn find_organizer_by_username(&self, username: &str) -> AppResult<Option<Organizer>> {
        Ok(self
            .organizers()
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls().insert_one(poll).await?;
        Ok(())
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.polls().find_one(doc! { "_id": poll_id }).await?)
    }

    async fn find_poll_for_organizer(
        &self,
        poll_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Poll>> {
        Ok(self
            .polls()
            .find_one(doc! { "_id": poll_id, "organizer_id": organizer_id })
            .await?)
    }

    async fn list_polls(&self, organizer_id: ObjectId) -> AppResult<Vec<Poll>> {
        let cursor = self
            .polls()
            .find(doc! { "organizer_id": organizer_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls()
            .replace_one(doc! { "_id": poll.id }, poll)
            .await?;
        Ok(())
    }

    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.polls().delete_one(doc! { "_id": poll_id }).await?;
        Ok(())
    }

    async fn poll_has_votes(&self, poll_id: ObjectId) -> AppResult<bool> {
        Ok(self
            .votes()
            .find_one(doc! { "poll_id": poll_id })
            .await?
            .is_some())
    }

    async fn insert_member(&self, member: &Member) -> AppResult<()> {
        self.members().insert_one(member).await?;
        Ok(())
    }

    async fn find_member_for_organizer(
        &self,
        member_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Member>> {
        Ok(self
            .members()
            .find_one(doc! { "_id": member_id, "organizer_id": organizer_id })
            .await?)
    }

    async fn list_members(&self, organizer_id: ObjectId) -> AppResult<Vec<Member>> {
        let cursor = self
            .members()
            .find(doc! { "organizer_id": organizer_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace_member(&self, member: &Member) -> AppResult<()> {
        self.members()
            .replace_one(doc! { "_id": member.id }, member)
            .await?;
        Ok(())
    }

    async fn delete_member(&self, member_id: ObjectId) -> AppResult<()> {
        self.members().delete_one(doc! { "_id": member_id }).await?;
        Ok(())
    }

    async fn insert_code(&self, code: &Code) -> AppResult<()> {
        self.codes().insert_one(code).await?;
        Ok(())
    }

    async fn find_code_by_token(&self, token: &str) -> AppResult<Option<Code>> {
        Ok(self.codes().find_one(doc! { "token": token }).await?)
    }

    async fn token_exists(&self, token: &str) -> AppResult<bool> {
        Ok(self
            .codes()
            .find_one(doc! { "token": token })
            .await?
            .is_some())
    }

    async fn list_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Code>> {
        let cursor = self.codes().find(doc! { "poll_id": poll_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_code(&self, code_id: ObjectId) -> AppResult<()> {
        self.codes().delete_one(doc! { "_id": code_id }).await?;
        Ok(())
    }

    async fn delete_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.codes().delete_many(doc! { "poll_id": poll_id }).await?;
        Ok(())
    }

    async fn delete_codes_for_member(&self, member_id: ObjectId) -> AppResult<()> {
        self.codes()
            .delete_many(doc! { "member_id": member_id })
            .await?;
        Ok(())
    }

    async fn redeem_code(&self, code_id: ObjectId) -> AppResult<bool> {
        // Single-document updates are atomic, so filtering on the spent
        // flag makes this a compare-and-set: of two concurrent casts,
        // exactly one sees a match.
        let redeemed = self
            .codes()
            .find_one_and_update(
                doc! { "_id": code_id, "spent": false },
                doc! { "$set": { "spent": true } },
            )
            .await?;
        Ok(redeemed.is_some())
    }

    async fn release_code(&self, code_id: ObjectId) -> AppResult<()> {
        self.codes()
            .update_one(doc! { "_id": code_id }, doc! { "$set": { "spent": false } })
            .await?;
        Ok(())
    }

    async fn insert_vote(&self, vote: &Vote) -> AppResult<()> {
        self.votes().insert_one(vote).await?;
        Ok(())
    }

    async fn list_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>> {
        let cursor = self.votes().find(doc! { "poll_id": poll_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<()> {
        self.votes().delete_many(doc! { "poll_id": poll_id }).await?;
        Ok(())
    }
}
