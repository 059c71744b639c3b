//! Price computation for discounted hotel offers.
//!
//! Until real rates are scraped, prices are derived from a base nightly price
//! and a fixed rate table: the discount for the program, a proportional tax and
//! a flat fee. The table lives in [`PricingConfig`] so it can be tuned from the
//! catalog file; its `Default` is the standard table.

use crate::{
    errors::{Error, Result},
    models::DiscountType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rate table used to turn a base price into a full price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Fractional discount per program name (0.10 = 10% off). Missing programs get 0.
    pub discount_rates: BTreeMap<String, f64>,
    /// Fraction of the discounted price charged as tax
    pub tax_rate: f64,
    /// Flat fee added to every offer
    pub flat_fee: f64,
    /// ISO 4217 code stamped on every quote
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let discount_rates = [("aarp", 0.10), ("aaa", 0.08), ("senior", 0.12)]
            .into_iter()
            .map(|(name, rate)| (name.to_string(), rate))
            .collect();

        Self {
            discount_rates,
            tax_rate: 0.15,
            flat_fee: 25.0,
            currency: "USD".to_string(),
        }
    }
}

impl PricingConfig {
    /// Discount rate for a program, 0 for `none` and programs without an entry.
    #[must_use]
    pub fn rate_for(&self, discount_type: &DiscountType) -> f64 {
        self.discount_rates
            .get(discount_type.as_str())
            .copied()
            .unwrap_or(0.0)
    }

    /// Rejects tables that could produce negative or nonsensical prices.
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in &self.discount_rates {
            if !rate.is_finite() || !(0.0..1.0).contains(rate) {
                return Err(Error::Config {
                    message: format!("Discount rate for '{name}' must be in [0, 1), got {rate}"),
                });
            }
        }
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(Error::Config {
                message: format!("Tax rate must be non-negative, got {}", self.tax_rate),
            });
        }
        if !self.flat_fee.is_finite() || self.flat_fee < 0.0 {
            return Err(Error::Config {
                message: format!("Flat fee must be non-negative, got {}", self.flat_fee),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Config {
                message: "Currency code cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Full breakdown of a computed offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub original: f64,
    pub discounted: f64,
    pub taxes: f64,
    pub fees: f64,
    pub total: f64,
    pub currency: String,
}

/// Computes the price of an offer from its base price and discount program.
///
/// `discounted = base * (1 - rate)`, `taxes = discounted * tax_rate`,
/// `fees = flat_fee`, `total = discounted + taxes + fees`.
///
/// # Errors
/// Returns `Error::Validation` if `base_price` is negative or not finite.
pub fn compute_price(
    base_price: f64,
    discount_type: &DiscountType,
    pricing: &PricingConfig,
) -> Result<PriceQuote> {
    if !base_price.is_finite() || base_price < 0.0 {
        return Err(Error::validation(format!(
            "Base price must be a non-negative number, got {base_price}"
        )));
    }

    let rate = pricing.rate_for(discount_type);
    let discounted = if rate > 0.0 {
        base_price * (1.0 - rate)
    } else {
        base_price
    };
    let taxes = discounted * pricing.tax_rate;
    let fees = pricing.flat_fee;

    Ok(PriceQuote {
        original: base_price,
        discounted,
        taxes,
        fees,
        total: discounted + taxes + fees,
        currency: pricing.currency.clone(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_discounted_programs_follow_formula() {
        let pricing = PricingConfig::default();
        for (discount_type, rate) in [
            (DiscountType::Aarp, 0.10),
            (DiscountType::Aaa, 0.08),
            (DiscountType::Senior, 0.12),
        ] {
            for base in [0.0, 99.99, 180.0, 250.0] {
                let quote = compute_price(base, &discount_type, &pricing).unwrap();
                let discounted = base * (1.0 - rate);
                assert!(approx(quote.original, base));
                assert!(approx(quote.discounted, discounted), "{discount_type} at {base}");
                assert!(approx(quote.taxes, discounted * 0.15));
                assert!(approx(quote.fees, 25.0));
                assert!(approx(quote.total, discounted + discounted * 0.15 + 25.0));
                assert_eq!(quote.currency, "USD");
            }
        }
    }

    #[test]
    fn test_none_and_unknown_programs_are_undiscounted() {
        let pricing = PricingConfig::default();
        for discount_type in [
            DiscountType::None,
            DiscountType::Military,
            DiscountType::Other("student".to_string()),
        ] {
            let quote = compute_price(220.0, &discount_type, &pricing).unwrap();
            assert_eq!(quote.discounted, 220.0);
            assert_eq!(quote.original, quote.discounted);
        }
    }

    #[test]
    fn test_senior_rate_at_lowest_base_price() {
        let quote =
            compute_price(180.0, &DiscountType::Senior, &PricingConfig::default()).unwrap();
        assert!(approx(quote.discounted, 158.4));
        assert!(approx(quote.taxes, 23.76));
        assert!(approx(quote.total, 207.16));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let result = compute_price(-1.0, &DiscountType::Aarp, &PricingConfig::default());
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        let result = compute_price(f64::NAN, &DiscountType::Aarp, &PricingConfig::default());
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
    }

    #[test]
    fn test_custom_rate_table() {
        let mut pricing = PricingConfig::default();
        pricing.discount_rates.insert("military".to_string(), 0.2);
        pricing.flat_fee = 0.0;
        pricing.tax_rate = 0.0;

        let quote = compute_price(100.0, &DiscountType::Military, &pricing).unwrap();
        assert!(approx(quote.total, 80.0));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        assert!(PricingConfig::default().validate().is_ok());

        let mut pricing = PricingConfig::default();
        pricing.discount_rates.insert("aarp".to_string(), 1.5);
        assert!(matches!(pricing.validate(), Err(Error::Config { .. })));

        let pricing = PricingConfig {
            flat_fee: -5.0,
            ..PricingConfig::default()
        };
        assert!(matches!(pricing.validate(), Err(Error::Config { .. })));

        let pricing = PricingConfig {
            currency: "  ".to_string(),
            ..PricingConfig::default()
        };
        assert!(matches!(pricing.validate(), Err(Error::Config { .. })));
    }
}
