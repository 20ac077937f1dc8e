//! The storage collaborator: CRUD plus the scoped lookups the lifecycle
//! operations need. Lifecycle code is generic over this trait so the
//! redemption and issuance invariants can be exercised without MongoDB.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::code_models::Code;
use crate::models::member_models::Member;
use crate::models::organizer_models::Organizer;
use crate::models::poll_models::Poll;
use crate::models::vote_models::Vote;
use crate::utils::error::AppResult;

pub mod mongo;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_organizer(&self, organizer: &Organizer) -> AppResult<()>;
    async fn find_organizer_by_username(&self, username: &str) -> AppResult<Option<Organizer>>;

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()>;
    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>>;
    async fn find_poll_for_organizer(
        &self,
        poll_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Poll>>;
    async fn list_polls(&self, organizer_id: ObjectId) -> AppResult<Vec<Poll>>;
    async fn replace_poll(&self, poll: &Poll) -> AppResult<()>;
    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<()>;
    async fn poll_has_votes(&self, poll_id: ObjectId) -> AppResult<bool>;

    async fn insert_member(&self, member: &Member) -> AppResult<()>;
    async fn find_member_for_organizer(
        &self,
        member_id: ObjectId,
        organizer_id: ObjectId,
    ) -> AppResult<Option<Member>>;
    async fn list_members(&self, organizer_id: ObjectId) -> AppResult<Vec<Member>>;
    async fn replace_member(&self, member: &Member) -> AppResult<()>;
    async fn delete_member(&self, member_id: ObjectId) -> AppResult<()>;

    async fn insert_code(&self, code: &Code) -> AppResult<()>;
    async fn find_code_by_token(&self, token: &str) -> AppResult<Option<Code>>;
    async fn token_exists(&self, token: &str) -> AppResult<bool>;
    async fn list_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Code>>;
    async fn delete_code(&self, code_id: ObjectId) -> AppResult<()>;
    async fn delete_codes_for_poll(&self, poll_id: ObjectId) -> AppResult<()>;
    async fn delete_codes_for_member(&self, member_id: ObjectId) -> AppResult<()>;
    /// Atomically flips the code from unspent to spent. Returns false if
    /// it was already spent or no longer exists, in which case nothing
    /// changed. This is the guard that keeps redemption at-most-once
    /// under concurrent casts of the same code.
    async fn redeem_code(&self, code_id: ObjectId) -> AppResult<bool>;
    /// Compensation for a vote insert that failed after redemption.
    async fn release_code(&self, code_id: ObjectId) -> AppResult<()>;

    async fn insert_vote(&self, vote: &Vote) -> AppResult<()>;
    async fn list_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>>;
    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<()>;
}
