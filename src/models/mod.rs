pub mod code_models;
pub mod member_models;
pub mod organizer_models;
pub mod poll_models;
pub mod vote_models;
