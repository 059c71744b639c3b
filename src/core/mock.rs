//! Mock result pipeline - Stands in for the scraping engine.
//!
//! Instead of visiting hotel sites, every known hotel is priced from a base
//! rate derived from its name and run through [`compute_price`] for each mock
//! discount program. The whole population runs in one database transaction, so
//! a search either receives every result and is marked `completed`, or is left
//! untouched.

use crate::{
    config::catalog::Catalog,
    core::{
        hotel,
        pricing::compute_price,
        result::{self, PriceBreakdown},
        search::{self, NewSearch},
    },
    entities::search::SearchStatus,
    errors::{Error, Result},
    models::DiscountType,
};
use chrono::{NaiveDate, TimeDelta, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Base nightly price for hotels whose name contains `name_contains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasePriceRule {
    pub name_contains: String,
    pub price: f64,
}

/// Parameters of the mock pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Requester recorded on demo searches
    pub user_id: String,
    pub location: String,
    /// Days from today until check-in
    pub check_in_offset_days: i64,
    pub nights: i64,
    pub guests: i32,
    /// Programs recorded in the demo search's filters
    pub requested_types: Vec<DiscountType>,
    /// Programs every hotel is priced under
    pub discount_types: Vec<DiscountType>,
    /// First matching rule wins
    pub base_prices: Vec<BasePriceRule>,
    pub default_base_price: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            user_id: "demo".to_string(),
            location: "New York, NY".to_string(),
            check_in_offset_days: 30,
            nights: 2,
            guests: 2,
            requested_types: vec![DiscountType::Aarp, DiscountType::Aaa, DiscountType::Senior],
            discount_types: vec![
                DiscountType::None,
                DiscountType::Aarp,
                DiscountType::Aaa,
                DiscountType::Senior,
            ],
            base_prices: vec![
                BasePriceRule {
                    name_contains: "Marriott".to_string(),
                    price: 250.0,
                },
                BasePriceRule {
                    name_contains: "Hilton".to_string(),
                    price: 220.0,
                },
            ],
            default_base_price: 180.0,
        }
    }
}

impl MockConfig {
    /// Base price of a hotel: the first rule whose keyword appears in the name,
    /// otherwise the default.
    #[must_use]
    pub fn base_price_for(&self, hotel_name: &str) -> f64 {
        self.base_prices
            .iter()
            .find(|rule| hotel_name.contains(&rule.name_contains))
            .map_or(self.default_base_price, |rule| rule.price)
    }
}

/// What a mock population produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockOutcome {
    pub search_id: String,
    pub hotels_used: usize,
    pub results_created: usize,
}

/// Fills `search_id` with mock results and marks it `completed`.
///
/// If no hotel exists yet, the catalog's sample hotels are created first.
/// Every hotel is then priced under each of the catalog's mock discount programs.
///
/// # Errors
/// * `Error::NotFound` if the search does not exist.
/// * `Error::InvalidStatusTransition` if the search is already completed or failed.
#[instrument(skip(db, catalog))]
pub async fn populate_mock_results(
    db: &DatabaseConnection,
    search_id: &str,
    catalog: &Catalog,
) -> Result<MockOutcome> {
    let txn = db.begin().await?;
    let outcome = populate_in(&txn, search_id, catalog).await?;
    txn.commit().await?;
    Ok(outcome)
}

/// Creates the catalog's demo search and populates it.
///
/// Creation and population share one transaction, so a failed population
/// leaves no search behind.
#[instrument(skip_all)]
pub async fn create_mock_search(db: &DatabaseConnection, catalog: &Catalog) -> Result<MockOutcome> {
    let mock = &catalog.mock;
    let today = Utc::now().date_naive();
    let check_in = offset_date(today, mock.check_in_offset_days, "mock.check_in_offset_days")?;
    let check_out = offset_date(check_in, mock.nights, "mock.nights")?;

    let txn = db.begin().await?;
    let search = search::create_search(
        &txn,
        NewSearch {
            user_id: Some(mock.user_id.clone()),
            location: mock.location.clone(),
            check_in,
            check_out,
            guests: mock.guests,
            discount_types: mock.requested_types.clone(),
        },
    )
    .await?;

    let outcome = populate_in(&txn, &search.id, catalog).await?;
    txn.commit().await?;
    Ok(outcome)
}

fn offset_date(date: NaiveDate, days: i64, field: &str) -> Result<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| Error::Config {
            message: format!("{field} = {days} is out of the calendar range"),
        })
}

async fn populate_in<C>(db: &C, search_id: &str, catalog: &Catalog) -> Result<MockOutcome>
where
    C: ConnectionTrait,
{
    let search = search::require_search(db, search_id).await?;
    if !search.status.can_transition_to(SearchStatus::Completed) {
        return Err(Error::InvalidStatusTransition {
            from: search.status,
            to: SearchStatus::Completed,
        });
    }

    let mut hotels = hotel::list_hotels(db).await?;
    if hotels.is_empty() {
        info!("No hotels stored, creating {} sample hotels", catalog.hotels.len());
        for sample in &catalog.hotels {
            hotels.push(hotel::create_hotel(db, sample.clone()).await?);
        }
    }

    let mut results_created = 0;
    for hotel in &hotels {
        let base_price = catalog.mock.base_price_for(&hotel.name);
        for discount_type in &catalog.mock.discount_types {
            let quote = compute_price(base_price, discount_type, &catalog.pricing)?;
            result::create_result(
                db,
                &search.id,
                &hotel.id,
                discount_type,
                PriceBreakdown::from(quote),
                true,
            )
            .await?;
            results_created += 1;
        }
    }

    search::update_search_status(db, &search.id, SearchStatus::Completed).await?;

    info!(
        "Mock search {} populated with {} results across {} hotels",
        search.id,
        results_created,
        hotels.len()
    );
    Ok(MockOutcome {
        search_id: search.id,
        hotels_used: hotels.len(),
        results_created,
    })
}
