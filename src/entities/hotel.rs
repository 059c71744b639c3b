//! Hotel entity - A single property belonging to a hotel chain.
//!
//! Hotels are created once (catalog seeding or mock population) and referenced
//! by every [`super::result`] row priced against them.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Amenities offered by a hotel, stored as a JSON array of tags
/// (e.g. `["wifi", "parking", "pool"]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Amenities(pub Vec<String>);

/// Hotel database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Hilton Midtown")
    #[sea_orm(indexed)]
    pub name: String,
    /// Owning chain used to look up discount codes (e.g., "Hilton")
    #[sea_orm(indexed)]
    pub chain: String,
    /// Street address
    pub address: Option<String>,
    #[sea_orm(indexed)]
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Star rating, typically 1.0 - 5.0
    pub star_rating: Option<f64>,
    #[sea_orm(column_type = "Json")]
    pub amenities: Amenities,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Hotel and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One hotel is priced by many results
    #[sea_orm(has_many = "super::result::Entity")]
    Results,
}

impl Related<super::result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
