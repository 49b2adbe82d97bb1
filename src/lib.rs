//! HTTP API for tracking Valorant players: username, rank and kill/death
//! ratio, stored in PostgreSQL.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use db::PlayerStore;
use state::AppState;

/// Builds the application router on top of `players`.
pub fn app(players: Arc<dyn PlayerStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player)
                .delete(routes::players::delete_player),
        )
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)

        .layer(TimeoutLayer::new(config::REQUEST_TIMEOUT))
        .layer(middleware::map_response(error::json_error_body))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(players))
}
