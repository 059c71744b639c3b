//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod discount_code;
pub mod hotel;
pub mod result;
pub mod search;
pub mod user;

// Re-export specific types to avoid conflicts (`Result` clashes with the crate alias)
pub use discount_code::{
    Column as DiscountCodeColumn, Entity as DiscountCode, Model as DiscountCodeModel,
};
pub use hotel::{Column as HotelColumn, Entity as Hotel, Model as HotelModel};
pub use result::{Column as SearchResultColumn, Entity as SearchResult, Model as SearchResultModel};
pub use search::{Column as SearchColumn, Entity as Search, Model as SearchModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
