//! HTTP interface - axum router over the core operations.
//!
//! `/` and `/health` live at the root; everything else is nested under `/api`.
//! Handlers only translate between JSON and core calls, errors are rendered by
//! [`error::ApiError`].

use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod error;
mod routes;
pub mod state;

pub use state::{AppState, State};

/// Builds the full application router.
pub fn construct_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::search::routes())
        .merge(routes::results::routes())
        .merge(routes::mock::routes())
        .merge(routes::discount_codes::routes());

    let cors = cors_layer(&state.config.settings.cors_origins);

    Router::new()
        .merge(routes::health::routes())
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|e| warn!("Ignoring invalid CORS origin '{}': {}", origin, e))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
