//! Discount code business logic.
//!
//! Codes are looked up per chain and optionally per program. Only active codes
//! are ever returned. Several codes may coexist for one (chain, program) pair.

use crate::{
    entities::{DiscountCode, discount_code},
    errors::{Error, Result},
    models::DiscountType,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

/// Attributes of a discount code to create. Also the shape of
/// `[[discount_codes]]` entries in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDiscountCode {
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub hotel_chain: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Creates a new discount code.
pub async fn create_discount_code<C>(
    db: &C,
    new_code: NewDiscountCode,
) -> Result<discount_code::Model>
where
    C: ConnectionTrait,
{
    if new_code.code.trim().is_empty() {
        return Err(Error::validation("Discount code cannot be empty"));
    }
    if new_code.hotel_chain.trim().is_empty() {
        return Err(Error::validation("Hotel chain cannot be empty"));
    }

    let now = Utc::now();
    let code = discount_code::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        code: Set(new_code.code.trim().to_string()),
        discount_type: Set(new_code.discount_type.to_string()),
        hotel_chain: Set(new_code.hotel_chain.trim().to_string()),
        requirements: Set(new_code.requirements),
        active: Set(new_code.active),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = code.insert(db).await?;
    info!(
        "Created discount code {} - {} ({})",
        created.hotel_chain, created.discount_type, created.code
    );
    Ok(created)
}

/// Active discount codes of `hotel_chain`, optionally narrowed to one program.
pub async fn get_discount_codes<C>(
    db: &C,
    hotel_chain: &str,
    discount_type: Option<&DiscountType>,
) -> Result<Vec<discount_code::Model>>
where
    C: ConnectionTrait,
{
    let mut query = DiscountCode::find()
        .filter(discount_code::Column::HotelChain.eq(hotel_chain))
        .filter(discount_code::Column::Active.eq(true));

    if let Some(discount_type) = discount_type {
        query = query.filter(discount_code::Column::DiscountType.eq(discount_type.as_str()));
    }

    let codes = query
        .order_by_asc(discount_code::Column::DiscountType)
        .order_by_asc(discount_code::Column::Code)
        .all(db)
        .await?;
    debug!("Found {} active codes for chain '{}'", codes.len(), hotel_chain);
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn code(code: &str, discount_type: DiscountType, chain: &str, active: bool) -> NewDiscountCode {
        NewDiscountCode {
            code: code.to_string(),
            discount_type,
            hotel_chain: chain.to_string(),
            requirements: Some("Membership card".to_string()),
            active,
        }
    }

    #[tokio::test]
    async fn test_get_codes_filters_inactive_and_type() -> Result<()> {
        let db = setup_test_db().await?;
        create_discount_code(&db, code("AARP", DiscountType::Aarp, "Hilton", true)).await?;
        create_discount_code(&db, code("AAA", DiscountType::Aaa, "Hilton", true)).await?;
        create_discount_code(&db, code("OLD", DiscountType::Aaa, "Hilton", false)).await?;
        create_discount_code(&db, code("ZA9", DiscountType::Aarp, "Marriott", true)).await?;

        let all = get_discount_codes(&db, "Hilton", None).await?;
        let codes: Vec<_> = all.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["AAA", "AARP"]);

        let aaa = get_discount_codes(&db, "Hilton", Some(&DiscountType::Aaa)).await?;
        assert_eq!(aaa.len(), 1);
        assert_eq!(aaa[0].code, "AAA");

        assert!(get_discount_codes(&db, "IHG", None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_codes_are_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        create_discount_code(&db, code("SEN", DiscountType::Senior, "IHG", true)).await?;
        create_discount_code(&db, code("SEN", DiscountType::Senior, "IHG", true)).await?;

        let codes = get_discount_codes(&db, "IHG", Some(&DiscountType::Senior)).await?;
        assert_eq!(codes.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_code_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_discount_code(&db, code(" ", DiscountType::Aaa, "IHG", true)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        let result = create_discount_code(&db, code("AAA", DiscountType::Aaa, "", true)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[test]
    fn test_parse_catalog_entry() -> std::result::Result<(), toml::de::Error> {
        let entry: NewDiscountCode = toml::from_str(
            r#"
            code = "ZA9"
            type = "senior"
            hotel_chain = "Marriott"
            requirements = "Age 62+"
            "#,
        )?;
        assert_eq!(entry.discount_type, DiscountType::Senior);
        assert!(entry.active);
        Ok(())
    }
}
