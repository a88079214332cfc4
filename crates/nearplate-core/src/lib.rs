pub mod app_config;
pub mod category;
pub mod config;
pub mod geo;
pub mod place;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_m, Coordinate, DEFAULT_ORIGIN};
pub use place::{OpenStatus, PlaceDetail, PlaceSummary, QueryCriteria};

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
