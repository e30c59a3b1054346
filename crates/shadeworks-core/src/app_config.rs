use std::net::SocketAddr;
use std::path::PathBuf;

use shadeworks_pricing::CatalogPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub catalog_path: PathBuf,
    /// Accept catalogs whose options carry negative deltas.
    pub allow_discounts: bool,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    /// Integrity rules to apply when loading the catalog.
    #[must_use]
    pub fn catalog_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            allow_discounts: self.allow_discounts,
        }
    }
}

/// The subset of configuration needed to load and price a catalog offline.
/// Server-only settings are not read, so a bad bind address cannot block it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub allow_discounts: bool,
}

impl CatalogSettings {
    #[must_use]
    pub fn catalog_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            allow_discounts: self.allow_discounts,
        }
    }
}
