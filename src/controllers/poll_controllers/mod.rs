pub mod cast_vote;
pub mod create_poll;
pub mod delete_poll;
pub mod get_codes;
pub mod get_poll;
pub mod get_polls;
pub mod get_votes;
pub mod issue_codes;
pub mod models;
pub mod update_poll;
