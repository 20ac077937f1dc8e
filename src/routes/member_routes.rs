use axum::{middleware, routing::get, Router};

use crate::controllers::member_controllers::{
    create_member, delete_member, get_member, get_members, update_member,
};
use crate::middleware::identity::resolve_identity;
use crate::state::AppState;

pub fn member_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(get_members::get_members).post(create_member::create_member),
        )
        .route(
            "/:memberId",
            get(get_member::get_member)
                .put(update_member::update_member)
                .delete(delete_member::delete_member),
        )
        .layer(middleware::from_fn(resolve_identity))
        .with_state(state)
}
