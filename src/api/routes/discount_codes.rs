use crate::{
    api::{error::ApiError, state::AppState},
    core::discount_code,
    entities::discount_code as code_entity,
    models::DiscountType,
};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new().route("/discount-codes", get(list_discount_codes))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeParams {
    pub chain: String,
    #[serde(rename = "type")]
    pub discount_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscountCodeItem {
    pub code: String,
    pub discount_type: String,
    pub requirements: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscountCodesResponse {
    pub hotel_chain: String,
    pub count: usize,
    pub codes: Vec<DiscountCodeItem>,
}

impl From<code_entity::Model> for DiscountCodeItem {
    fn from(model: code_entity::Model) -> Self {
        Self {
            code: model.code,
            discount_type: model.discount_type,
            requirements: model.requirements,
        }
    }
}

/// Active codes of a chain, optionally narrowed to one program.
#[tracing::instrument(name = "GET /api/discount-codes", skip(state))]
pub async fn list_discount_codes(
    State(state): State<AppState>,
    Query(params): Query<DiscountCodeParams>,
) -> Result<Json<DiscountCodesResponse>, ApiError> {
    let chain = params.chain.trim();
    if chain.is_empty() {
        return Err(ApiError::bad_request("Query parameter 'chain' cannot be empty"));
    }
    // An empty `type=` means no filter
    let discount_type = params
        .discount_type
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(DiscountType::parse);

    let codes: Vec<DiscountCodeItem> =
        discount_code::get_discount_codes(&state.db, chain, discount_type.as_ref())
            .await?
            .into_iter()
            .map(DiscountCodeItem::from)
            .collect();

    Ok(Json(DiscountCodesResponse {
        hotel_chain: chain.to_string(),
        count: codes.len(),
        codes,
    }))
}
