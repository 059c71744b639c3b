//! Search entity - A request to compare discount prices for a location and stay.
//!
//! A search starts out `pending` and is driven towards `completed` or `failed`
//! by whatever produces its results (currently the mock pipeline). Deleting a
//! search cascades to its results.

use crate::models::DiscountType;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a search.
///
/// `pending -> processing -> completed`, with `pending -> completed` allowed for
/// producers that finish in one step. `failed` is reachable from any
/// non-terminal state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    /// Created, nothing has picked it up yet
    #[sea_orm(string_value = "pending")]
    Pending,
    /// A producer is gathering results
    #[sea_orm(string_value = "processing")]
    Processing,
    /// All results are stored
    #[sea_orm(string_value = "completed")]
    Completed,
    /// The producer gave up
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl SearchStatus {
    /// Wire/database spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// `completed` and `failed` accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Processing | Self::Completed | Self::Failed)
            | (Self::Processing, Self::Completed | Self::Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured filters attached to a search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SearchFilters {
    /// Discount programs the requester wants compared
    #[serde(default)]
    pub discount_types: Vec<DiscountType>,
}

/// Search database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "searches")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Requester identity, `"anonymous"` until authentication exists
    #[sea_orm(indexed)]
    pub user_id: String,
    /// Free-form location query (city, address or hotel name)
    pub location: String,
    pub check_in_date: Date,
    pub check_out_date: Date,
    /// Number of guests, 1 - 10
    pub guests: i32,
    #[sea_orm(column_type = "Json")]
    pub filters: SearchFilters,
    pub status: SearchStatus,
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    /// Stamped together with the `completed` status
    pub completed_at: Option<DateTimeUtc>,
}

/// Defines relationships between Search and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One search owns many results
    #[sea_orm(has_many = "super::result::Entity")]
    Results,
}

impl Related<super::result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use SearchStatus::{Completed, Failed, Pending, Processing};

        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));

        assert!(!Processing.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
        for terminal in [Completed, Failed] {
            assert!(terminal.is_terminal());
            for next in [Pending, Processing, Completed, Failed] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&SearchStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        assert_eq!(SearchStatus::Failed.to_string(), "failed");
    }
}
