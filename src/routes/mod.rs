pub mod auth_routes;
pub mod member_routes;
pub mod poll_routes;
