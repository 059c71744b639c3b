use serde::Deserialize;

pub mod discount_codes;
pub mod health;
pub mod mock;
pub mod results;
pub mod search;

#[derive(Clone, Deserialize, Debug, Default)]
pub struct PaginationParams {
    pub limit: Option<u64>,
}
