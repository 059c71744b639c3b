//! Catalog loading from catalog.toml
//!
//! The catalog holds everything about pricing that is data rather than code:
//! the discount rate table, the mock pipeline's parameters, and the hotels and
//! discount codes seeded on startup. Every section is optional; anything left
//! out falls back to the built-in defaults, and a missing file means "all
//! defaults".

use crate::{
    core::{
        discount_code::NewDiscountCode,
        hotel::NewHotel,
        mock::MockConfig,
        pricing::PricingConfig,
        search::{MAX_GUESTS, MIN_GUESTS},
    },
    errors::{Error, Result},
    models::DiscountType,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default catalog file, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Furthest the demo search's check-in may lie in the future.
const MAX_CHECK_IN_OFFSET_DAYS: i64 = 3650;
/// Longest demo stay.
const MAX_NIGHTS: i64 = 365;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub pricing: PricingConfig,
    pub mock: MockConfig,
    /// Hotels seeded on startup; also used by the mock pipeline when none exist
    pub hotels: Vec<NewHotel>,
    pub discount_codes: Vec<NewDiscountCode>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            mock: MockConfig::default(),
            hotels: default_hotels(),
            discount_codes: default_discount_codes(),
        }
    }
}

impl Catalog {
    /// Checks the pricing table and the mock parameters.
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;

        let mock = &self.mock;
        if !(0..=MAX_CHECK_IN_OFFSET_DAYS).contains(&mock.check_in_offset_days) {
            return Err(Error::Config {
                message: format!(
                    "mock.check_in_offset_days must be between 0 and {MAX_CHECK_IN_OFFSET_DAYS}, got {}",
                    mock.check_in_offset_days
                ),
            });
        }
        if !(1..=MAX_NIGHTS).contains(&mock.nights) {
            return Err(Error::Config {
                message: format!(
                    "mock.nights must be between 1 and {MAX_NIGHTS}, got {}",
                    mock.nights
                ),
            });
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&mock.guests) {
            return Err(Error::Config {
                message: format!(
                    "mock.guests must be between {MIN_GUESTS} and {MAX_GUESTS}, got {}",
                    mock.guests
                ),
            });
        }
        if !mock.default_base_price.is_finite() || mock.default_base_price < 0.0 {
            return Err(Error::Config {
                message: "mock.default_base_price must be non-negative".to_string(),
            });
        }
        if let Some(rule) = mock
            .base_prices
            .iter()
            .find(|rule| !rule.price.is_finite() || rule.price < 0.0)
        {
            return Err(Error::Config {
                message: format!("Base price for '{}' must be non-negative", rule.name_contains),
            });
        }
        Ok(())
    }
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The pricing table or mock parameters fail validation
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    debug!("Attempting to load catalog from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path_ref.display()),
    })?;

    let catalog = parse_catalog(&contents)?;
    info!(
        "Loaded catalog from {}: {} hotels, {} discount codes",
        path_ref.display(),
        catalog.hotels.len(),
        catalog.discount_codes.len()
    );
    Ok(catalog)
}

/// Loads the catalog at `path`, or the built-in defaults if the file does not exist.
pub fn load_catalog_or_default<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_catalog(path_ref)
    } else {
        info!(
            "No catalog at {}, using built-in defaults",
            path_ref.display()
        );
        Ok(Catalog::default())
    }
}

/// Parses and validates catalog TOML.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })?;
    catalog.validate()?;
    Ok(catalog)
}

fn default_hotels() -> Vec<NewHotel> {
    let hotel = |name: &str, chain: &str, address: &str| NewHotel {
        address: Some(address.to_string()),
        city: Some("New York".to_string()),
        state: Some("NY".to_string()),
        ..NewHotel::new(name, chain)
    };

    vec![
        hotel(
            "Marriott Times Square",
            "Marriott",
            "1535 Broadway, New York, NY 10036",
        ),
        hotel(
            "Hilton Midtown",
            "Hilton",
            "1335 Avenue of the Americas, New York, NY 10019",
        ),
        hotel(
            "Holiday Inn Times Square",
            "IHG",
            "585 8th Ave, New York, NY 10018",
        ),
    ]
}

fn default_discount_codes() -> Vec<NewDiscountCode> {
    let code = |code: &str, discount_type: DiscountType, chain: &str, requirements: &str| {
        NewDiscountCode {
            code: code.to_string(),
            discount_type,
            hotel_chain: chain.to_string(),
            requirements: Some(requirements.to_string()),
            active: true,
        }
    };

    vec![
        code("ZA9", DiscountType::Aarp, "Marriott", "AARP membership"),
        code("ZAA", DiscountType::Aaa, "Marriott", "AAA membership"),
        code("ZA9", DiscountType::Senior, "Marriott", "Age 62+"),
        code("AARP", DiscountType::Aarp, "Hilton", "AARP membership"),
        code("AAA", DiscountType::Aaa, "Hilton", "AAA membership"),
        code("SEN", DiscountType::Senior, "Hilton", "Age 60+"),
        code("AARP", DiscountType::Aarp, "IHG", "AARP membership"),
        code("AAA", DiscountType::Aaa, "IHG", "AAA membership"),
        code("SEN", DiscountType::Senior, "IHG", "Age 62+"),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_empty_catalog_is_all_defaults() {
        let catalog = parse_catalog("").unwrap();
        assert_eq!(catalog, Catalog::default());
        assert_eq!(catalog.hotels.len(), 3);
        assert_eq!(catalog.discount_codes.len(), 9);
        assert_eq!(catalog.pricing.tax_rate, 0.15);
    }

    #[test]
    fn test_partial_overrides() {
        let toml_str = r#"
            [pricing]
            flat_fee = 30.0

            [pricing.discount_rates]
            aarp = 0.15
            military = 0.2

            [mock]
            default_base_price = 150.0
            discount_types = ["none", "military"]

            [[hotels]]
            name = "Hyatt Regency"
            chain = "Hyatt"
            city = "Chicago"
            amenities = ["wifi"]
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.pricing.flat_fee, 30.0);
        // Untouched keys keep their defaults
        assert_eq!(catalog.pricing.tax_rate, 0.15);
        assert_eq!(catalog.pricing.rate_for(&DiscountType::Military), 0.2);
        // A replaced table replaces all rates
        assert_eq!(catalog.pricing.rate_for(&DiscountType::Senior), 0.0);

        assert_eq!(catalog.mock.default_base_price, 150.0);
        assert_eq!(catalog.mock.location, "New York, NY");
        assert_eq!(
            catalog.mock.discount_types,
            vec![DiscountType::None, DiscountType::Military]
        );

        assert_eq!(catalog.hotels.len(), 1);
        assert_eq!(catalog.hotels[0].amenities, vec!["wifi".to_string()]);
        assert_eq!(catalog.discount_codes.len(), 9);
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let result = parse_catalog("[pricing]\ntax_rate = -0.1\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_catalog("[mock]\nnights = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_catalog("[mock]\nnights = 366\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_catalog("[mock]\ncheck_in_offset_days = 9000000000000\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_catalog("[mock]\ncheck_in_offset_days = -1\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        for guests in [0, 11] {
            let result = parse_catalog(&format!("[mock]\nguests = {guests}\n"));
            assert!(matches!(result, Err(Error::Config { .. })));
        }

        // Bounds themselves are accepted
        parse_catalog("[mock]\ncheck_in_offset_days = 3650\nnights = 365\nguests = 10\n").unwrap();

        let result = parse_catalog("hotels = 5");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_shipped_catalog_matches_defaults() {
        let catalog = parse_catalog(include_str!("../../catalog.toml")).unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let catalog = load_catalog_or_default("definitely/not/here/catalog.toml").unwrap();
        assert_eq!(catalog, Catalog::default());

        assert!(matches!(
            load_catalog("definitely/not/here/catalog.toml"),
            Err(Error::Config { .. })
        ));
    }
}
