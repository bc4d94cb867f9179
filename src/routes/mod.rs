pub mod auth;
pub mod dishes;
pub mod reservations;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full HTTP surface over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(auth::router())
        .merge(dishes::router())
        .merge(reservations::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / liveness probe.
async fn index() -> &'static str {
    "Server is running! Database connection has been established. All routes should be available."
}
