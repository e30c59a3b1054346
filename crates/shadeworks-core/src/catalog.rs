use std::path::Path;

use shadeworks_pricing::{Catalog, CatalogPolicy};

use crate::ConfigError;

/// Catalog document encodings accepted by [`load_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Picks the format from a file extension. Anything that is not `.json`
    /// is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Load and validate a catalog from a YAML or JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails the
/// catalog integrity checks.
pub fn load_catalog(path: &Path, policy: CatalogPolicy) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = parse_catalog(&content, CatalogFormat::from_path(path), policy)?;

    tracing::info!(
        path = %path.display(),
        products = catalog.products.len(),
        categories = catalog.categories.len(),
        currency = %catalog.currency_code,
        "catalog loaded"
    );

    Ok(catalog)
}

/// Parse and validate a catalog document already in memory.
///
/// # Errors
///
/// Returns `ConfigError` on parse failure or integrity violation.
pub fn parse_catalog(
    content: &str,
    format: CatalogFormat,
    policy: CatalogPolicy,
) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = match format {
        CatalogFormat::Yaml => {
            serde_yaml::from_str(content).map_err(ConfigError::CatalogYamlParse)?
        }
        CatalogFormat::Json => {
            serde_json::from_str(content).map_err(ConfigError::CatalogJsonParse)?
        }
    };

    if let Err(err) = catalog.validate(policy) {
        tracing::error!(error = %err, "catalog failed integrity checks");
        return Err(ConfigError::CatalogIntegrity(err));
    }

    Ok(catalog)
}
