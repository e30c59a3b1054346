pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, CatalogSettings, Environment};
pub use catalog::{load_catalog, parse_catalog, CatalogFormat};
pub use config::{load_app_config, load_app_config_from_env, load_catalog_settings};
pub use products::{find_by_slug, list_products, ProductSummary};

use shadeworks_pricing::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog YAML: {0}")]
    CatalogYamlParse(#[source] serde_yaml::Error),

    #[error("failed to parse catalog JSON: {0}")]
    CatalogJsonParse(#[source] serde_json::Error),

    #[error("catalog rejected: {0}")]
    CatalogIntegrity(#[source] PricingError),
}
