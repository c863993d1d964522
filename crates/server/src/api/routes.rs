use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::middleware::{metrics_middleware, viewer_middleware};
use super::{handlers, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Movie detail page
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}/bookmark", post(movies::toggle_bookmark))
        .route("/movies/{id}/watched", post(movies::toggle_watched))
        .route("/movies/{id}/watched/rating", post(movies::rate_movie))
        .route("/movies/{id}/share", post(movies::share_movie))
        .route("/movies/{id}/trailer", get(movies::launch_trailer))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            viewer_middleware,
        ))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
