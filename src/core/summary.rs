//! Summary business logic - Comparing the offers of one search.
//!
//! Results are grouped by hotel and the cheapest available offer is picked as
//! the best deal. A search without results yields [`SearchSummary::NoResults`]
//! instead; that is a normal answer for a search still being processed, not an
//! error.

use crate::{
    entities::{hotel, result, search::SearchStatus},
    errors::Result,
};
use sea_orm::ConnectionTrait;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Message returned while a search has no results.
pub const NO_RESULTS_MESSAGE: &str = "No results available yet";

/// One offer as listed under its hotel in a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelOffer {
    pub discount_type: String,
    pub total_price: Option<f64>,
    pub available: bool,
}

/// Cheapest available offer of a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDeal {
    /// Hotel display name
    pub hotel: String,
    pub discount_type: String,
    pub price: f64,
}

/// Offers grouped by hotel name, hotels in the order their first result was
/// captured. Serialized as a JSON object with keys in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelGroups(Vec<(String, Vec<HotelOffer>)>);

impl HotelGroups {
    fn push(&mut self, hotel: String, offer: HotelOffer) {
        match self.0.iter_mut().find(|(name, _)| *name == hotel) {
            Some((_, offers)) => offers.push(offer),
            None => self.0.push((hotel, vec![offer])),
        }
    }

    /// Offers of one hotel, in capture order.
    #[must_use]
    pub fn get(&self, hotel: &str) -> Option<&[HotelOffer]> {
        self.0
            .iter()
            .find(|(name, _)| name == hotel)
            .map(|(_, offers)| offers.as_slice())
    }

    /// Hotel names in first-capture order.
    pub fn hotels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for HotelGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, offers)| (name, offers)))
    }
}

/// Comparison of all offers captured for a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchSummary {
    /// Nothing has been captured yet
    NoResults {
        search_id: String,
        status: SearchStatus,
        message: String,
    },
    /// At least one result exists
    Compared {
        search_id: String,
        status: SearchStatus,
        total_results: usize,
        hotels_compared: usize,
        /// `None` when no offer is available
        best_deal: Option<BestDeal>,
        /// Hotel name to its offers, in capture order
        by_hotel: HotelGroups,
    },
}

/// Builds the summary of a search from its results and their hotels.
///
/// Results are visited in the given order. The best deal is the first available
/// result with the lowest total price; results without a total never qualify.
/// A missing hotel row is keyed by its id.
#[must_use]
pub fn summarize_results(
    search_id: &str,
    status: SearchStatus,
    rows: &[(result::Model, Option<hotel::Model>)],
) -> SearchSummary {
    if rows.is_empty() {
        return SearchSummary::NoResults {
            search_id: search_id.to_string(),
            status,
            message: NO_RESULTS_MESSAGE.to_string(),
        };
    }

    let mut by_hotel = HotelGroups::default();
    let mut best_deal: Option<BestDeal> = None;

    for (result, hotel) in rows {
        let hotel_key = hotel
            .as_ref()
            .map_or_else(|| result.hotel_id.clone(), |h| h.name.clone());

        if result.available {
            if let Some(price) = result.total_price {
                if best_deal.as_ref().is_none_or(|best| price < best.price) {
                    best_deal = Some(BestDeal {
                        hotel: hotel_key.clone(),
                        discount_type: result.discount_type.clone(),
                        price,
                    });
                }
            }
        }

        by_hotel.push(
            hotel_key,
            HotelOffer {
                discount_type: result.discount_type.clone(),
                total_price: result.total_price,
                available: result.available,
            },
        );
    }

    SearchSummary::Compared {
        search_id: search_id.to_string(),
        status,
        total_results: rows.len(),
        hotels_compared: by_hotel.len(),
        best_deal,
        by_hotel,
    }
}

/// Loads a search's results and summarizes them.
///
/// # Errors
/// Returns `Error::NotFound` if the search does not exist.
pub async fn summarize<C>(db: &C, search_id: &str) -> Result<SearchSummary>
where
    C: ConnectionTrait,
{
    let search = crate::core::search::require_search(db, search_id).await?;
    let rows = crate::core::result::get_results_with_hotels(db, search_id).await?;
    debug!("Summarizing {} results for search {}", rows.len(), search_id);
    Ok(summarize_results(&search.id, search.status, &rows))
}
