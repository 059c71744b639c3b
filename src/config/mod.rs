//! Configuration management
//!
//! Two sources feed the service: environment variables ([`settings`]) and the
//! TOML catalog ([`catalog`]). Both are read once at startup into an
//! [`AppConfig`] which is then shared read-only.

/// Pricing table, mock parameters and seed data from catalog.toml
pub mod catalog;
/// Database configuration and connection management
pub mod database;
/// Runtime settings from environment variables
pub mod settings;

use crate::errors::Result;
use catalog::Catalog;
use settings::Settings;
use tracing::info;

/// Everything the service needs to know before it starts serving
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub settings: Settings,
    pub catalog: Catalog,
}

impl AppConfig {
    /// Reads settings from the environment, then the catalog they point to.
    ///
    /// # Errors
    /// Returns `Error::Config` for an invalid setting or an unreadable catalog.
    pub fn load() -> Result<Self> {
        let settings = Settings::from_env()?;
        let catalog = catalog::load_catalog_or_default(&settings.catalog_path)?;
        info!(
            "Configuration loaded for environment '{}'",
            settings.environment
        );
        Ok(Self { settings, catalog })
    }
}
