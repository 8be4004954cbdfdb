use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, FilterConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a filter toggle is missing or a value is invalid.
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
/// Returns `ConfigError` if a filter toggle is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_bool = |var: &str| -> Result<Option<bool>, ConfigError> {
        lookup(var).ok().map(|raw| parse_bool(var, &raw)).transpose()
    };

    let filter = FilterConfig::from_toggles(
        optional_bool("MLINV_ALLOW_REFURBISHED")?,
        optional_bool("MLINV_ALLOW_BUNDLES")?,
        optional_bool("MLINV_ALLOW_LOCKED")?,
    )?;

    let env = parse_environment(&or_default("MLINV_ENV", "development"))?;
    let vocabulary_path = lookup("MLINV_VOCABULARY_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let batch_parallel = parse_bool(
        "MLINV_BATCH_PARALLEL",
        &or_default("MLINV_BATCH_PARALLEL", "true"),
    )?;

    Ok(AppConfig {
        env,
        filter,
        vocabulary_path,
        batch_parallel,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MLINV_ENV".to_string(),
            reason: format!("unknown environment {other:?}"),
        }),
    }
}
