use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

mod controllers;
mod db;
mod middleware;
mod models;
mod ops;
mod routes;
mod state;
mod store;
mod utils;
mod validation;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("evote_backend=info")),
        )
        .init();

    let database = match db::connection::init_db().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = state::AppState::new(store::mongo::MongoStore::new(database));

    let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| {
        tracing::error!("CORS_ORIGIN environment variable not set");
        std::process::exit(1);
    });

    let origin = cors_origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        tracing::error!("failed to parse CORS origin: {}", cors_origin);
        std::process::exit(1);
    });

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::AUTHORIZATION,
            axum::http::header::COOKIE,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/auth", routes::auth_routes::auth_routes(app_state.clone()))
        .nest("/api/polls", routes::poll_routes::poll_routes(app_state.clone()))
        .nest(
            "/api/members",
            routes::member_routes::member_routes(app_state.clone()),
        )
        .layer(cors);

    let server_addr =
        std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let addr: SocketAddr = server_addr.parse().unwrap_or_else(|_| {
        tracing::error!("failed to parse SERVER_ADDR: {}", server_addr);
        std::process::exit(1);
    });

    tracing::info!("server running at http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}

async fn root() -> Json<serde_json::Value> {
    let seconds = START_TIME.elapsed().as_secs();

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {}s", seconds)
    }))
}
