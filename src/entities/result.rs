//! Result entity - One priced offer for one hotel under one discount type.
//!
//! Results belong to exactly one search and one hotel and are never updated
//! after capture. When all of `discounted_price`, `taxes` and `fees` are known,
//! `total_price` equals their sum.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra data captured alongside a price (room type, rate plan, source URL ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SupplementaryData(pub BTreeMap<String, serde_json::Value>);

/// Result database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "results")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning search
    #[sea_orm(indexed)]
    pub search_id: String,
    /// Hotel this offer was priced against
    #[sea_orm(indexed)]
    pub hotel_id: String,
    /// `none`, `aarp`, `aaa`, `senior`, `military`, `corporate`, or anything a source reports
    #[sea_orm(indexed)]
    pub discount_type: String,
    pub original_price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub taxes: f64,
    pub fees: f64,
    pub total_price: Option<f64>,
    /// ISO 4217 currency code
    pub currency: String,
    pub available: bool,
    #[sea_orm(column_type = "Json")]
    pub raw_data: SupplementaryData,
    #[sea_orm(indexed)]
    pub scraped_at: DateTimeUtc,
}

/// Defines relationships between Result and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each result belongs to one search; removing the search removes its results
    #[sea_orm(
        belongs_to = "super::search::Entity",
        from = "Column::SearchId",
        to = "super::search::Column::Id",
        on_delete = "Cascade"
    )]
    Search,
    /// Each result prices one hotel
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
}

impl Related<super::search::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Search.def()
    }
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
