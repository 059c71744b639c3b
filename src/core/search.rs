//! Search business logic - Creating, reading and advancing searches.
//!
//! A search is the unit a client polls: it is created `pending`, results are
//! attached to it by a producer, and its status is advanced along the lifecycle
//! defined by [`SearchStatus::can_transition_to`].

use crate::{
    entities::{
        Search, SearchResult,
        result,
        search::{self, SearchFilters, SearchStatus},
    },
    errors::{Error, Result},
    models::DiscountType,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Requester recorded when no identity is supplied.
pub const ANONYMOUS_USER: &str = "anonymous";
/// Smallest party a search can be made for.
pub const MIN_GUESTS: i32 = 1;
/// Largest party a search can be made for.
pub const MAX_GUESTS: i32 = 10;
/// Page size for [`list_recent_searches`] when the caller does not pick one.
pub const DEFAULT_LIST_LIMIT: u64 = 10;
const MAX_LIST_LIMIT: u64 = 100;

/// Input for [`create_search`].
#[derive(Debug, Clone)]
pub struct NewSearch {
    /// Requester; `None` records [`ANONYMOUS_USER`]
    pub user_id: Option<String>,
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub discount_types: Vec<DiscountType>,
}

impl NewSearch {
    fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(Error::validation("Location cannot be empty"));
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&self.guests) {
            return Err(Error::validation(format!(
                "Guests must be between {MIN_GUESTS} and {MAX_GUESTS}, got {}",
                self.guests
            )));
        }
        if self.check_out <= self.check_in {
            return Err(Error::validation(format!(
                "Check-out ({}) must be after check-in ({})",
                self.check_out, self.check_in
            )));
        }
        Ok(())
    }
}

/// Creates a new search in the `pending` state after validating the stay.
///
/// Rejects an empty location, a guest count outside 1-10, and a check-out that
/// is not strictly after check-in.
pub async fn create_search<C>(db: &C, new_search: NewSearch) -> Result<search::Model>
where
    C: ConnectionTrait,
{
    new_search.validate()?;

    let user_id = new_search
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());

    let search = search::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id),
        location: Set(new_search.location.trim().to_string()),
        check_in_date: Set(new_search.check_in),
        check_out_date: Set(new_search.check_out),
        guests: Set(new_search.guests),
        filters: Set(SearchFilters {
            discount_types: new_search.discount_types,
        }),
        status: Set(SearchStatus::Pending),
        created_at: Set(Utc::now()),
        completed_at: Set(None),
    };

    let created = search.insert(db).await?;
    info!(
        "Created search {} for '{}' ({} to {}, {} guests)",
        created.id,
        created.location,
        created.check_in_date,
        created.check_out_date,
        created.guests
    );
    Ok(created)
}

/// Finds a search by id, returning `None` if it does not exist.
pub async fn get_search<C>(db: &C, search_id: &str) -> Result<Option<search::Model>>
where
    C: ConnectionTrait,
{
    Search::find_by_id(search_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_search`], but a missing search is an [`Error::NotFound`].
pub async fn require_search<C>(db: &C, search_id: &str) -> Result<search::Model>
where
    C: ConnectionTrait,
{
    get_search(db, search_id)
        .await?
        .ok_or_else(|| Error::not_found("Search", search_id))
}

/// Lists the most recent searches, newest first.
///
/// `limit` defaults to [`DEFAULT_LIST_LIMIT`] and is capped at 100.
pub async fn list_recent_searches<C>(db: &C, limit: Option<u64>) -> Result<Vec<search::Model>>
where
    C: ConnectionTrait,
{
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let searches = Search::find()
        .order_by_desc(search::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;
    debug!("Fetched {} recent searches", searches.len());
    Ok(searches)
}

/// Moves a search to `status`.
///
/// The completion timestamp is stamped in the same write that sets `completed`,
/// so a completed search always carries one. Transitions the lifecycle does not
/// allow fail with [`Error::InvalidStatusTransition`].
#[instrument(skip(db))]
pub async fn update_search_status<C>(
    db: &C,
    search_id: &str,
    status: SearchStatus,
) -> Result<search::Model>
where
    C: ConnectionTrait,
{
    let current = require_search(db, search_id).await?;

    if !current.status.can_transition_to(status) {
        return Err(Error::InvalidStatusTransition {
            from: current.status,
            to: status,
        });
    }

    let previous = current.status;
    let mut active_model: search::ActiveModel = current.into();
    if status == SearchStatus::Completed {
        active_model.completed_at = Set(Some(Utc::now()));
    }
    active_model.status = Set(status);

    let updated = active_model.update(db).await?;
    info!("Search {} moved from {} to {}", search_id, previous, status);
    Ok(updated)
}

/// Deletes a search together with all of its results.
///
/// Hotels referenced by the results are left untouched. Returns the number of
/// results removed.
#[instrument(skip(db))]
pub async fn delete_search(db: &DatabaseConnection, search_id: &str) -> Result<u64> {
    let txn = db.begin().await?;

    let search = require_search(&txn, search_id).await?;

    let removed = SearchResult::delete_many()
        .filter(result::Column::SearchId.eq(search_id))
        .exec(&txn)
        .await?
        .rows_affected;

    search.delete(&txn).await?;
    txn.commit().await?;

    info!("Deleted search {} and {} results", search_id, removed);
    Ok(removed)
}
