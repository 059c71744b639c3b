use crate::{
    api::{error::ApiError, routes::PaginationParams, state::AppState},
    core::search::{self, NewSearch},
    entities::search::SearchStatus,
    models::DiscountType,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(create_search))
        .route("/search/{search_id}", delete(delete_search))
        .route("/searches", get(list_searches))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: i32,
    #[serde(default = "default_discount_types")]
    pub discount_types: Vec<DiscountType>,
}

const fn default_guests() -> i32 {
    2
}

fn default_discount_types() -> Vec<DiscountType> {
    vec![DiscountType::Aarp, DiscountType::Aaa, DiscountType::Senior]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_id: String,
    pub status: SearchStatus,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListItem {
    pub search_id: String,
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub status: SearchStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    pub count: usize,
    pub searches: Vec<SearchListItem>,
}

/// Records a new search; results are attached later by a producer.
#[tracing::instrument(name = "POST /api/search", skip(state, request))]
pub async fn create_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let created = search::create_search(
        &state.db,
        NewSearch {
            user_id: None,
            location: request.location,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            discount_types: request.discount_types,
        },
    )
    .await?;

    Ok(Json(SearchResponse {
        message: format!(
            "Search initiated for {}. Use /api/results/{} to check progress.",
            created.location, created.id
        ),
        search_id: created.id,
        status: created.status,
    }))
}

#[tracing::instrument(name = "GET /api/searches", skip(state))]
pub async fn list_searches(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<SearchListResponse>, ApiError> {
    let searches: Vec<SearchListItem> = search::list_recent_searches(&state.db, params.limit)
        .await?
        .into_iter()
        .map(|s| SearchListItem {
            search_id: s.id,
            location: s.location,
            check_in: s.check_in_date,
            check_out: s.check_out_date,
            guests: s.guests,
            status: s.status,
            created_at: s.created_at,
        })
        .collect();

    Ok(Json(SearchListResponse {
        count: searches.len(),
        searches,
    }))
}

#[tracing::instrument(name = "DELETE /api/search/{search_id}", skip(state))]
pub async fn delete_search(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    search::delete_search(&state.db, &search_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
