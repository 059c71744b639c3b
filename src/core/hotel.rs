//! Hotel business logic - Creating and looking up hotel properties.

use crate::{
    entities::{
        Hotel,
        hotel::{self, Amenities},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

/// Attributes of a hotel to create. Also the shape of `[[hotels]]` entries in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub chain: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Defaults to `"USA"` when absent
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub star_rating: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl NewHotel {
    /// A hotel with only its name and chain filled in.
    #[must_use]
    pub fn new(name: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain: chain.into(),
            address: None,
            city: None,
            state: None,
            country: None,
            latitude: None,
            longitude: None,
            star_rating: None,
            amenities: Vec::new(),
        }
    }
}

/// Creates a new hotel.
///
/// Name and chain are trimmed and must not be empty; a star rating, when given,
/// must lie between 0 and 5.
pub async fn create_hotel<C>(db: &C, new_hotel: NewHotel) -> Result<hotel::Model>
where
    C: ConnectionTrait,
{
    if new_hotel.name.trim().is_empty() {
        return Err(Error::validation("Hotel name cannot be empty"));
    }
    if new_hotel.chain.trim().is_empty() {
        return Err(Error::validation("Hotel chain cannot be empty"));
    }
    if let Some(rating) = new_hotel.star_rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(Error::validation(format!(
                "Star rating must be between 0 and 5, got {rating}"
            )));
        }
    }

    let now = Utc::now();
    let hotel = hotel::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(new_hotel.name.trim().to_string()),
        chain: Set(new_hotel.chain.trim().to_string()),
        address: Set(new_hotel.address),
        city: Set(new_hotel.city),
        state: Set(new_hotel.state),
        country: Set(Some(new_hotel.country.unwrap_or_else(|| "USA".to_string()))),
        latitude: Set(new_hotel.latitude),
        longitude: Set(new_hotel.longitude),
        star_rating: Set(new_hotel.star_rating),
        amenities: Set(Amenities(new_hotel.amenities)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = hotel.insert(db).await?;
    info!(
        "Created hotel '{}' ({}) with id {}",
        created.name, created.chain, created.id
    );
    Ok(created)
}

/// Finds a hotel by id.
pub async fn get_hotel<C>(db: &C, hotel_id: &str) -> Result<Option<hotel::Model>>
where
    C: ConnectionTrait,
{
    Hotel::find_by_id(hotel_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// All hotels, ordered by name.
pub async fn list_hotels<C>(db: &C) -> Result<Vec<hotel::Model>>
where
    C: ConnectionTrait,
{
    Hotel::find()
        .order_by_asc(hotel::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a hotel by exact name and city. Used to avoid seeding duplicates.
pub async fn find_hotel_by_name_and_city<C>(
    db: &C,
    name: &str,
    city: &str,
) -> Result<Option<hotel::Model>>
where
    C: ConnectionTrait,
{
    let hotel = Hotel::find()
        .filter(hotel::Column::Name.eq(name))
        .filter(hotel::Column::City.eq(city))
        .one(db)
        .await?;
    debug!("Hotel lookup '{}' in '{}': {:?}", name, city, hotel.as_ref().map(|h| &h.id));
    Ok(hotel)
}

/// Every hotel of `chain` located in `city`.
pub async fn find_hotels_by_chain_and_city<C>(
    db: &C,
    chain: &str,
    city: &str,
) -> Result<Vec<hotel::Model>>
where
    C: ConnectionTrait,
{
    Hotel::find()
        .filter(hotel::Column::Chain.eq(chain))
        .filter(hotel::Column::City.eq(city))
        .order_by_asc(hotel::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
