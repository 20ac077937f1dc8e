pub mod auth_controllers;
pub mod member_controllers;
pub mod poll_controllers;
