//! Shared value types that are not database tables themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of rate-reduction program a price was quoted under.
///
/// The well-known programs get their own variants. Anything else a source
/// reports is kept verbatim in [`DiscountType::Other`] so no data is lost.
/// Serialized as its lowercase name (`"aarp"`, `"none"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountType {
    /// Public rate, no program applied
    None,
    /// AARP member rate
    Aarp,
    /// AAA member rate
    Aaa,
    /// Age-based senior rate
    Senior,
    /// Active duty and veteran rate
    Military,
    /// Negotiated company rate
    Corporate,
    /// Program not known to this service
    Other(String),
}

impl DiscountType {
    /// Lowercase name used on the wire and in the database.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Aarp => "aarp",
            Self::Aaa => "aaa",
            Self::Senior => "senior",
            Self::Military => "military",
            Self::Corporate => "corporate",
            Self::Other(name) => name,
        }
    }

    /// Parses a program name, case-insensitively and ignoring surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "" | "none" => Self::None,
            "aarp" => Self::Aarp,
            "aaa" => Self::Aaa,
            "senior" => Self::Senior,
            "military" => Self::Military,
            "corporate" => Self::Corporate,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for DiscountType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for DiscountType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<DiscountType> for String {
    fn from(value: DiscountType) -> Self {
        match value {
            DiscountType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
