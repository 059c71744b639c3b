//! Result business logic - Storing and reading priced offers.
//!
//! Every result must point at an existing search and an existing hotel; a
//! dangling reference is refused with [`Error::Integrity`] before anything is
//! written. Prices are validated so stored rows never carry negative or
//! non-finite amounts, and `total = discounted + taxes + fees` holds whenever
//! the discounted price is known.

use crate::{
    core::pricing::PriceQuote,
    entities::{
        Hotel, Search, SearchResult, hotel,
        result::{self, SupplementaryData},
    },
    errors::{Error, Result},
    models::DiscountType,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Allowed drift between a supplied total and `discounted + taxes + fees`.
const TOTAL_TOLERANCE: f64 = 0.01;
const DEFAULT_CURRENCY: &str = "USD";

/// Price fields of an offer as reported by a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBreakdown {
    pub original: Option<f64>,
    pub discounted: Option<f64>,
    pub taxes: f64,
    pub fees: f64,
    /// Derived from the other fields when absent and `discounted` is known
    pub total: Option<f64>,
    /// Defaults to `"USD"`
    pub currency: Option<String>,
    pub raw_data: SupplementaryData,
}

impl From<PriceQuote> for PriceBreakdown {
    fn from(quote: PriceQuote) -> Self {
        Self {
            original: Some(quote.original),
            discounted: Some(quote.discounted),
            taxes: quote.taxes,
            fees: quote.fees,
            total: Some(quote.total),
            currency: Some(quote.currency),
            raw_data: SupplementaryData::default(),
        }
    }
}

impl PriceBreakdown {
    /// Checks every amount and fills in a missing total.
    fn normalize(mut self) -> Result<Self> {
        let amounts = [
            ("original price", self.original),
            ("discounted price", self.discounted),
            ("taxes", Some(self.taxes)),
            ("fees", Some(self.fees)),
            ("total price", self.total),
        ];
        for (label, amount) in amounts {
            if let Some(value) = amount {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::validation(format!(
                        "{label} must be a non-negative number, got {value}"
                    )));
                }
            }
        }

        if let Some(discounted) = self.discounted {
            let expected = discounted + self.taxes + self.fees;
            match self.total {
                Some(total) if (total - expected).abs() > TOTAL_TOLERANCE => {
                    return Err(Error::validation(format!(
                        "Total price {total} does not equal discounted + taxes + fees ({expected})"
                    )));
                }
                Some(_) => {}
                None => self.total = Some(expected),
            }
        }

        Ok(self)
    }
}

/// Stores one priced offer for `hotel_id` under `discount_type` within `search_id`.
///
/// # Errors
/// * `Error::Integrity` if the search or the hotel does not exist; nothing is stored.
/// * `Error::Validation` for negative or inconsistent prices.
#[instrument(skip(db, prices))]
pub async fn create_result<C>(
    db: &C,
    search_id: &str,
    hotel_id: &str,
    discount_type: &DiscountType,
    prices: PriceBreakdown,
    available: bool,
) -> Result<result::Model>
where
    C: ConnectionTrait,
{
    let prices = prices.normalize()?;

    if Search::find_by_id(search_id.to_string())
        .one(db)
        .await?
        .is_none()
    {
        return Err(Error::Integrity {
            message: format!("Result references unknown search {search_id}"),
        });
    }
    if Hotel::find_by_id(hotel_id.to_string())
        .one(db)
        .await?
        .is_none()
    {
        return Err(Error::Integrity {
            message: format!("Result references unknown hotel {hotel_id}"),
        });
    }

    let result = result::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        search_id: Set(search_id.to_string()),
        hotel_id: Set(hotel_id.to_string()),
        discount_type: Set(discount_type.to_string()),
        original_price: Set(prices.original),
        discounted_price: Set(prices.discounted),
        taxes: Set(prices.taxes),
        fees: Set(prices.fees),
        total_price: Set(prices.total),
        currency: Set(prices
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())),
        available: Set(available),
        raw_data: Set(prices.raw_data),
        scraped_at: Set(Utc::now()),
    };

    let created = result.insert(db).await?;
    info!(
        "Stored {} result for hotel {} in search {}: total {:?}",
        created.discount_type, hotel_id, search_id, created.total_price
    );
    Ok(created)
}

/// All results of a search in capture order.
pub async fn get_results_for_search<C>(db: &C, search_id: &str) -> Result<Vec<result::Model>>
where
    C: ConnectionTrait,
{
    let results = SearchResult::find()
        .filter(result::Column::SearchId.eq(search_id))
        .order_by_asc(result::Column::ScrapedAt)
        .all(db)
        .await?;
    debug!("Fetched {} results for search {}", results.len(), search_id);
    Ok(results)
}

/// Results of a search joined with the hotel each one prices, in capture order.
///
/// The hotel is `None` only if its row has disappeared since the result was stored.
pub async fn get_results_with_hotels<C>(
    db: &C,
    search_id: &str,
) -> Result<Vec<(result::Model, Option<hotel::Model>)>>
where
    C: ConnectionTrait,
{
    SearchResult::find()
        .filter(result::Column::SearchId.eq(search_id))
        .order_by_asc(result::Column::ScrapedAt)
        .find_also_related(Hotel)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::pricing::{PricingConfig, compute_price};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_result_from_quote() -> Result<()> {
        let (db, search, hotel) = setup_with_search_and_hotel().await?;
        let quote = compute_price(220.0, &DiscountType::Aarp, &PricingConfig::default())?;

        let stored = create_result(
            &db,
            &search.id,
            &hotel.id,
            &DiscountType::Aarp,
            quote.clone().into(),
            true,
        )
        .await?;

        assert_eq!(stored.discount_type, "aarp");
        assert_eq!(stored.original_price, Some(220.0));
        assert_eq!(stored.total_price, Some(quote.total));
        assert_eq!(stored.currency, "USD");
        assert!(stored.available);

        let results = get_results_for_search(&db, &search.id).await?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, stored.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_total_is_derived() -> Result<()> {
        let (db, search, hotel) = setup_with_search_and_hotel().await?;

        let stored = create_result(
            &db,
            &search.id,
            &hotel.id,
            &DiscountType::Other("government".to_string()),
            PriceBreakdown {
                original: Some(200.0),
                discounted: Some(150.0),
                taxes: 15.0,
                fees: 10.0,
                ..PriceBreakdown::default()
            },
            false,
        )
        .await?;

        assert_eq!(stored.total_price, Some(175.0));
        assert_eq!(stored.discount_type, "government");
        assert!(!stored.available);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_search_or_hotel_is_integrity_error() -> Result<()> {
        let (db, search, hotel) = setup_with_search_and_hotel().await?;

        let result = create_test_result(&db, "no-such-search", &hotel.id, DiscountType::Aaa, 100.0, true)
            .await;
        assert!(matches!(result.unwrap_err(), Error::Integrity { .. }));

        let result = create_test_result(&db, &search.id, "no-such-hotel", DiscountType::Aaa, 100.0, true)
            .await;
        assert!(matches!(result.unwrap_err(), Error::Integrity { .. }));

        // Nothing was persisted
        assert!(SearchResult::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_price_validation() -> Result<()> {
        let (db, search, hotel) = setup_with_search_and_hotel().await?;

        let negative = PriceBreakdown {
            original: Some(-10.0),
            ..PriceBreakdown::default()
        };
        let result =
            create_result(&db, &search.id, &hotel.id, &DiscountType::None, negative, true).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let inconsistent = PriceBreakdown {
            discounted: Some(100.0),
            taxes: 15.0,
            fees: 25.0,
            total: Some(100.0),
            ..PriceBreakdown::default()
        };
        let result =
            create_result(&db, &search.id, &hotel.id, &DiscountType::None, inconsistent, true)
                .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let infinite_fee = PriceBreakdown {
            fees: f64::INFINITY,
            ..PriceBreakdown::default()
        };
        let result =
            create_result(&db, &search.id, &hotel.id, &DiscountType::None, infinite_fee, true)
                .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        assert!(SearchResult::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_results_joined_with_hotels() -> Result<()> {
        let (db, search, hilton) = setup_with_search_and_hotel().await?;
        let marriott = create_test_hotel(&db, "Marriott Times Square", "Marriott").await?;

        create_test_result(&db, &search.id, &hilton.id, DiscountType::Aarp, 200.0, true).await?;
        create_test_result(&db, &search.id, &marriott.id, DiscountType::Aarp, 230.0, true).await?;

        let rows = get_results_with_hotels(&db, &search.id).await?;
        assert_eq!(rows.len(), 2);
        let names: Vec<_> = rows
            .iter()
            .map(|(_, hotel)| hotel.as_ref().unwrap().name.clone())
            .collect();
        assert!(names.contains(&"Hilton Midtown".to_string()));
        assert!(names.contains(&"Marriott Times Square".to_string()));
        Ok(())
    }
}
