//! Catalog seeding - Loading the configured hotels and discount codes on startup.
//!
//! Seeding is idempotent: a hotel is skipped when one with the same name and
//! city exists, and a code is skipped when an active code with the same code
//! string already covers the same chain and program. Running it on every
//! startup therefore only adds what the catalog gained since the last run.

use crate::{
    config::catalog::Catalog,
    core::{discount_code, hotel},
    entities::{DiscountCode, Hotel, discount_code as code_entity, hotel as hotel_entity},
    errors::Result,
};
use sea_orm::{DatabaseConnection, PaginatorTrait, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Counts of what a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub hotels_created: usize,
    pub hotels_skipped: usize,
    pub codes_created: usize,
    pub codes_skipped: usize,
}

/// Creates the catalog's hotels and discount codes that are not stored yet.
///
/// All inserts happen in one transaction.
#[instrument(skip_all)]
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &Catalog) -> Result<SeedReport> {
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    for new_hotel in &catalog.hotels {
        let name = new_hotel.name.trim();
        let exists = match &new_hotel.city {
            Some(city) => hotel::find_hotel_by_name_and_city(&txn, name, city)
                .await?
                .is_some(),
            None => {
                Hotel::find()
                    .filter(hotel_entity::Column::Name.eq(name))
                    .filter(hotel_entity::Column::City.is_null())
                    .count(&txn)
                    .await?
                    > 0
            }
        };

        if exists {
            debug!("Hotel '{}' already seeded", new_hotel.name);
            report.hotels_skipped += 1;
            continue;
        }
        hotel::create_hotel(&txn, new_hotel.clone()).await?;
        report.hotels_created += 1;
    }

    for new_code in &catalog.discount_codes {
        let existing = DiscountCode::find()
            .filter(code_entity::Column::Code.eq(new_code.code.trim()))
            .filter(code_entity::Column::HotelChain.eq(new_code.hotel_chain.trim()))
            .filter(code_entity::Column::DiscountType.eq(new_code.discount_type.as_str()))
            .filter(code_entity::Column::Active.eq(true))
            .count(&txn)
            .await?;

        if existing > 0 {
            debug!(
                "Discount code {} for {} already seeded",
                new_code.code, new_code.hotel_chain
            );
            report.codes_skipped += 1;
            continue;
        }
        discount_code::create_discount_code(&txn, new_code.clone()).await?;
        report.codes_created += 1;
    }

    txn.commit().await?;
    info!(
        "Seeded catalog: {} hotels created ({} skipped), {} codes created ({} skipped)",
        report.hotels_created, report.hotels_skipped, report.codes_created, report.codes_skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::hotel::NewHotel, models::DiscountType, test_utils::*};

    #[tokio::test]
    async fn test_seed_default_catalog() -> Result<()> {
        let db = setup_test_db().await?;
        let report = seed_catalog(&db, &Catalog::default()).await?;

        assert_eq!(
            report,
            SeedReport {
                hotels_created: 3,
                hotels_skipped: 0,
                codes_created: 9,
                codes_skipped: 0,
            }
        );

        let marriott = discount_code::get_discount_codes(&db, "Marriott", None).await?;
        assert_eq!(marriott.len(), 3);
        let senior = discount_code::get_discount_codes(&db, "Hilton", Some(&DiscountType::Senior))
            .await?;
        assert_eq!(senior.len(), 1);
        assert_eq!(senior[0].code, "SEN");
        assert_eq!(senior[0].requirements.as_deref(), Some("Age 60+"));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_twice_creates_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let catalog = Catalog::default();
        seed_catalog(&db, &catalog).await?;

        let second = seed_catalog(&db, &catalog).await?;
        assert_eq!(second.hotels_created, 0);
        assert_eq!(second.hotels_skipped, 3);
        assert_eq!(second.codes_created, 0);
        assert_eq!(second.codes_skipped, 9);
        assert_eq!(Hotel::find().count(&db).await?, 3);
        assert_eq!(DiscountCode::find().count(&db).await?, 9);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_only_adds_missing_rows() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_hotel(&db, "Hilton Midtown", "Hilton").await?;

        let mut catalog = Catalog::default();
        catalog.discount_codes.clear();
        // No city: matched against hotels without one
        catalog.hotels.push(NewHotel::new("Roadside Inn", "Independent"));

        let report = seed_catalog(&db, &catalog).await?;
        assert_eq!(report.hotels_created, 3);
        assert_eq!(report.hotels_skipped, 1);

        let again = seed_catalog(&db, &catalog).await?;
        assert_eq!(again.hotels_created, 0);
        assert_eq!(again.hotels_skipped, 4);
        Ok(())
    }
}
