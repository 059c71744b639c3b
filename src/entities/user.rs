//! User entity - An account holding membership numbers and search preferences.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Membership program to member number (e.g., `"aarp" -> "12345"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Memberships(pub BTreeMap<String, String>);

/// Free-form search preferences keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Preferences(pub BTreeMap<String, serde_json::Value>);

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique, indexed)]
    pub email: String,
    #[sea_orm(column_type = "Json")]
    pub memberships: Memberships,
    #[sea_orm(column_type = "Json")]
    pub preferences: Preferences,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
