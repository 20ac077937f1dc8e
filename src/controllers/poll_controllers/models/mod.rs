use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::code_models::Code;
use crate::models::poll_models::Poll;
use crate::models::vote_models::Vote;

#[derive(Serialize, Debug)]
pub struct PollResponse {
    pub id: String,
    pub question: String,
    pub select_min: i64,
    pub select_max: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub options: Vec<OptionResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct OptionResponse {
    pub id: String,
    pub text: String,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id.to_hex(),
            question: poll.question,
            select_min: poll.select_min,
            select_max: poll.select_max,
            start_time: poll.start_time,
            end_time: poll.end_time,
            options: poll
                .options
                .into_iter()
                .map(|option| OptionResponse {
                    id: option.id,
                    text: option.text,
                })
                .collect(),
            created_at: poll.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CodeResponse {
    pub id: String,
    pub poll_id: String,
    pub member_id: String,
    pub token: String,
    pub spent: bool,
}

impl From<Code> for CodeResponse {
    fn from(code: Code) -> Self {
        Self {
            id: code.id.to_hex(),
            poll_id: code.poll_id.to_hex(),
            member_id: code.member_id.to_hex(),
            token: code.token,
            spent: code.spent,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct VoteResponse {
    pub id: String,
    pub poll_id: String,
    pub member_id: String,
    pub options: Vec<String>,
    pub time: DateTime<Utc>,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id.to_hex(),
            poll_id: vote.poll_id.to_hex(),
            member_id: vote.member_id.to_hex(),
            options: vote.option_ids,
            time: vote.time,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct PollsQuery {
    pub code: Option<String>,
}
