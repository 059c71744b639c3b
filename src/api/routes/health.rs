use crate::api::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub health: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub version: String,
}

#[tracing::instrument(name = "GET /")]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Travel Discount Comparison API".to_string(),
        version: API_VERSION.to_string(),
        health: "/health".to_string(),
    })
}

#[tracing::instrument(name = "GET /health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.config.settings.environment.clone(),
        version: API_VERSION.to_string(),
    })
}
