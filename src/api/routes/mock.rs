use crate::{
    api::{error::ApiError, state::AppState},
    core::mock::{self, MockOutcome},
    entities::search::SearchStatus,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mock/search", post(create_mock_search))
        .route("/mock/search/{search_id}", post(populate_search))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MockSearchResponse {
    pub search_id: String,
    pub status: SearchStatus,
    pub message: String,
}

impl MockSearchResponse {
    fn new(outcome: MockOutcome, action: &str) -> Self {
        Self {
            message: format!(
                "Mock search {action} with {} results",
                outcome.results_created
            ),
            search_id: outcome.search_id,
            status: SearchStatus::Completed,
        }
    }
}

/// Creates the demo search and fills it with mock results.
#[tracing::instrument(name = "POST /api/mock/search", skip(state))]
pub async fn create_mock_search(
    State(state): State<AppState>,
) -> Result<Json<MockSearchResponse>, ApiError> {
    let outcome = mock::create_mock_search(&state.db, &state.config.catalog).await?;
    Ok(Json(MockSearchResponse::new(outcome, "created")))
}

#[tracing::instrument(name = "POST /api/mock/search/{search_id}", skip(state))]
pub async fn populate_search(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<MockSearchResponse>, ApiError> {
    let outcome = mock::populate_mock_results(&state.db, &search_id, &state.config.catalog).await?;
    Ok(Json(MockSearchResponse::new(outcome, "populated")))
}
