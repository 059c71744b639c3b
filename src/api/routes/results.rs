use crate::{
    api::{error::ApiError, state::AppState},
    core::{
        result,
        search,
        summary::{self, SearchSummary},
    },
    entities::search::SearchStatus,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Rendered in place of a hotel whose row no longer exists.
const UNKNOWN_HOTEL: &str = "Unknown";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/results/{search_id}", get(get_results))
        .route("/results/{search_id}/summary", get(get_summary))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultItem {
    pub result_id: String,
    pub hotel_name: String,
    pub hotel_chain: String,
    pub discount_type: String,
    pub original_price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub taxes: f64,
    pub fees: f64,
    pub total_price: Option<f64>,
    pub currency: String,
    pub available: bool,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub search_id: String,
    pub status: SearchStatus,
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub result_count: usize,
    pub results: Vec<ResultItem>,
}

#[tracing::instrument(name = "GET /api/results/{search_id}", skip(state))]
pub async fn get_results(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let search = search::require_search(&state.db, &search_id).await?;
    let rows = result::get_results_with_hotels(&state.db, &search_id).await?;

    let results: Vec<ResultItem> = rows
        .into_iter()
        .map(|(r, hotel)| {
            let (hotel_name, hotel_chain) = hotel.map_or_else(
                || (UNKNOWN_HOTEL.to_string(), UNKNOWN_HOTEL.to_string()),
                |h| (h.name, h.chain),
            );
            ResultItem {
                result_id: r.id,
                hotel_name,
                hotel_chain,
                discount_type: r.discount_type,
                original_price: r.original_price,
                discounted_price: r.discounted_price,
                taxes: r.taxes,
                fees: r.fees,
                total_price: r.total_price,
                currency: r.currency,
                available: r.available,
                scraped_at: r.scraped_at,
            }
        })
        .collect();

    Ok(Json(ResultsResponse {
        search_id: search.id,
        status: search.status,
        location: search.location,
        check_in: search.check_in_date,
        check_out: search.check_out_date,
        guests: search.guests,
        result_count: results.len(),
        results,
    }))
}

#[tracing::instrument(name = "GET /api/results/{search_id}/summary", skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<SearchSummary>, ApiError> {
    Ok(Json(summary::summarize(&state.db, &search_id).await?))
}
