//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        hotel::{self, NewHotel},
        result::{self, PriceBreakdown},
        search::{self, NewSearch},
    },
    entities,
    errors::Result,
    models::DiscountType,
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness so it shows up for failing tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Check-in / check-out dates `offset` and `offset + nights` days from today.
#[must_use]
pub fn stay_dates(offset: i64, nights: i64) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    (today + Duration::days(offset), today + Duration::days(offset + nights))
}

/// Creates a test search with sensible defaults.
///
/// # Defaults
/// * `user_id`: `"test_user"`
/// * stay: 30 days out, 2 nights
/// * `guests`: 2
/// * `discount_types`: aarp, aaa, senior
pub async fn create_test_search(
    db: &DatabaseConnection,
    location: &str,
) -> Result<entities::search::Model> {
    let (check_in, check_out) = stay_dates(30, 2);
    search::create_search(
        db,
        NewSearch {
            user_id: Some("test_user".to_string()),
            location: location.to_string(),
            check_in,
            check_out,
            guests: 2,
            discount_types: vec![DiscountType::Aarp, DiscountType::Aaa, DiscountType::Senior],
        },
    )
    .await
}

/// Creates a test hotel in New York with the given name and chain.
pub async fn create_test_hotel(
    db: &DatabaseConnection,
    name: &str,
    chain: &str,
) -> Result<entities::hotel::Model> {
    hotel::create_hotel(
        db,
        NewHotel {
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            ..NewHotel::new(name, chain)
        },
    )
    .await
}

/// Stores a result whose total is exactly `total` (no taxes or fees).
pub async fn create_test_result(
    db: &DatabaseConnection,
    search_id: &str,
    hotel_id: &str,
    discount_type: DiscountType,
    total: f64,
    available: bool,
) -> Result<entities::result::Model> {
    result::create_result(
        db,
        search_id,
        hotel_id,
        &discount_type,
        PriceBreakdown {
            original: Some(total),
            discounted: Some(total),
            total: Some(total),
            ..PriceBreakdown::default()
        },
        available,
    )
    .await
}

/// Sets up a complete test environment with one search and one hotel.
/// Returns (db, search, hotel) for result-related tests.
pub async fn setup_with_search_and_hotel() -> Result<(
    DatabaseConnection,
    entities::search::Model,
    entities::hotel::Model,
)> {
    let db = setup_test_db().await?;
    let search = create_test_search(&db, "New York, NY").await?;
    let hotel = create_test_hotel(&db, "Hilton Midtown", "Hilton").await?;
    Ok((db, search, hotel))
}
