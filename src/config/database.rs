//! Database configuration module.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables and their indexes are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches the Rust
//! structs without hand-written SQL. Creation is idempotent (`IF NOT EXISTS`), which
//! lets the service call it on every startup.

use crate::entities::{DiscountCode, Hotel, Search, SearchResult, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the `SQLite` database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/travel_discounts.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first, so a fresh
/// checkout can start without preparing `data/` by hand.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_parent(database_url) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::connect(database_url).await?;
    info!("Connected to database: {}", database_url);
    Ok(db)
}

/// Returns the directory holding the database file, or `None` for in-memory
/// and non-`SQLite` URLs.
fn sqlite_file_parent(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent()
}

/// Creates all tables and indexes if they do not already exist.
///
/// Hotels and searches are created before results so the result foreign keys
/// point at existing tables.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table_for(db, &schema, Hotel).await?;
    create_table_for(db, &schema, Search).await?;
    create_table_for(db, &schema, SearchResult).await?;
    create_table_for(db, &schema, DiscountCode).await?;
    create_table_for(db, &schema, User).await?;

    info!("Database tables ready");
    Ok(())
}

async fn create_table_for<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!("Ensured table '{}'", entity.table_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{HotelModel, SearchModel, SearchResultModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<HotelModel> = Hotel::find().limit(1).all(&db).await?;
        let _: Vec<SearchModel> = Search::find().limit(1).all(&db).await?;
        let _: Vec<SearchResultModel> = SearchResult::find().limit(1).all(&db).await?;
        let _ = DiscountCode::find().limit(1).all(&db).await?;
        let _ = User::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_parent() {
        assert_eq!(
            sqlite_file_parent(DEFAULT_DATABASE_URL),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_file_parent("sqlite::memory:"), None);
        assert_eq!(sqlite_file_parent("postgres://localhost/db"), None);
        assert_eq!(
            sqlite_file_parent("sqlite:///tmp/travel/db.sqlite"),
            Some(Path::new("/tmp/travel"))
        );
    }
}
