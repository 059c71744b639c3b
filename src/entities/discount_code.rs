//! Discount code entity - A booking code a chain honours for a discount program.
//!
//! Several codes may exist for the same (chain, type) pair; nothing in the
//! schema makes them unique.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Discount code database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discount_codes")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Code entered at booking time (e.g., "ZA9")
    pub code: String,
    /// Discount program the code belongs to
    pub discount_type: String,
    /// Chain that honours the code
    #[sea_orm(indexed)]
    pub hotel_chain: String,
    /// Eligibility description (e.g., "Age 62+")
    pub requirements: Option<String>,
    /// Inactive codes are hidden from lookups
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// `DiscountCode` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
