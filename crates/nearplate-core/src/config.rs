use crate::app_config::{AppConfig, Environment};
use crate::geo::{Coordinate, DEFAULT_ORIGIN};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let places_api_key = require("NEARPLATE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("NEARPLATE_ENV", "development"));
    let log_level = or_default("NEARPLATE_LOG_LEVEL", "info");

    let places_base_url = or_default(
        "NEARPLATE_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place",
    );
    let directions_base_url = or_default(
        "NEARPLATE_DIRECTIONS_BASE_URL",
        "https://maps.googleapis.com/maps/api/directions",
    );
    let geolocation_base_url = or_default(
        "NEARPLATE_GEOLOCATION_BASE_URL",
        "https://www.googleapis.com/geolocation/v1",
    );

    let search_radius_m = parse_u32("NEARPLATE_SEARCH_RADIUS_M", "10000")?;
    let request_timeout_secs = parse_u64("NEARPLATE_REQUEST_TIMEOUT_SECS", "30")?;
    let max_concurrent_details = parse_usize("NEARPLATE_MAX_CONCURRENT_DETAILS", "8")?;
    let max_retries = parse_u32("NEARPLATE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("NEARPLATE_RETRY_BACKOFF_BASE_MS", "1000")?;

    let fallback_origin = Coordinate {
        lat: parse_f64("NEARPLATE_FALLBACK_LAT", DEFAULT_ORIGIN.lat)?,
        lng: parse_f64("NEARPLATE_FALLBACK_LNG", DEFAULT_ORIGIN.lng)?,
    };

    let user_agent = or_default("NEARPLATE_USER_AGENT", "nearplate/0.1 (nearby-eats)");

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        directions_base_url,
        geolocation_base_url,
        search_radius_m,
        request_timeout_secs,
        max_concurrent_details,
        max_retries,
        retry_backoff_base_ms,
        fallback_origin,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
