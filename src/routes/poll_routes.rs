use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{
    cast_vote, create_poll, delete_poll, get_codes, get_poll, get_polls, get_votes, issue_codes,
    update_poll,
};
use crate::middleware::identity::resolve_identity;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_polls::get_polls).post(create_poll::create_poll))
        .route(
            "/:pollId",
            get(get_poll::get_poll)
                .put(update_poll::update_poll)
                .delete(delete_poll::delete_poll),
        )
        .route(
            "/:pollId/codes",
            post(issue_codes::issue_codes).get(get_codes::get_codes),
        )
        .route(
            "/:pollId/votes",
            post(cast_vote::cast_vote).get(get_votes::get_votes),
        )
        .layer(middleware::from_fn(resolve_identity))
        .with_state(state)
}
