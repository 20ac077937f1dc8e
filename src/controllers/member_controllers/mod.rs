pub mod create_member;
pub mod delete_member;
pub mod get_member;
pub mod get_members;
pub mod models;
pub mod update_member;
