use std::env::VarError;
use std::path::PathBuf;

use crate::app_config::{AppConfig, CatalogSettings, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load only the catalog-related settings, for offline tools.
///
/// Calls `dotenvy::dotenv().ok()` first, like [`load_app_config`].
///
/// # Errors
///
/// Returns `ConfigError` if a catalog setting is present but invalid.
pub fn load_catalog_settings() -> Result<CatalogSettings, ConfigError> {
    dotenvy::dotenv().ok();
    build_catalog_settings(|key| std::env::var(key))
}

fn build_catalog_settings<F>(lookup: F) -> Result<CatalogSettings, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let allow_discounts = match or_default("SHADEWORKS_ALLOW_DISCOUNTS", "false")
        .to_ascii_lowercase()
        .as_str()
    {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" => false,
        other => {
            return Err(ConfigError::InvalidEnvVar {
                var: "SHADEWORKS_ALLOW_DISCOUNTS".to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            })
        }
    };

    Ok(CatalogSettings {
        log_level: or_default("SHADEWORKS_LOG_LEVEL", "info"),
        catalog_path: PathBuf::from(or_default(
            "SHADEWORKS_CATALOG_PATH",
            "./config/catalog.yaml",
        )),
        allow_discounts,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHADEWORKS_ENV", "development"))?;
    let bind_addr = parse_addr("SHADEWORKS_BIND_ADDR", "0.0.0.0:3000")?;
    let CatalogSettings {
        log_level,
        catalog_path,
        allow_discounts,
    } = build_catalog_settings(&lookup)?;
    let rate_limit_per_minute = parse_usize("SHADEWORKS_RATE_LIMIT_PER_MINUTE", "120")?;

    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "SHADEWORKS_RATE_LIMIT_PER_MINUTE",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        allow_discounts,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHADEWORKS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
