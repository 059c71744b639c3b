//! Core business logic - Framework-agnostic operations
//!
//! Every operation is a free async function over a sea-orm connection, generic
//! over `ConnectionTrait` where it may run inside a caller's transaction. The
//! HTTP layer in `api` is a thin shell around these functions.

/// Discount code storage and lookup
pub mod discount_code;
/// Hotel creation and lookup
pub mod hotel;
/// Mock result pipeline standing in for the scraper
pub mod mock;
/// Price computation from base rates
pub mod pricing;
/// Result storage and retrieval
pub mod result;
/// Search lifecycle
pub mod search;
/// Idempotent catalog seeding
pub mod seed;
/// Best-deal aggregation
pub mod summary;
/// User accounts
pub mod user;
