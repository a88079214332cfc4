use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// API key for the places/directions/geolocation provider.
    pub places_api_key: String,
    pub places_base_url: String,
    pub directions_base_url: String,
    pub geolocation_base_url: String,
    /// Search radius in meters. The provider caps nearby search at 50 km.
    pub search_radius_m: u32,
    pub request_timeout_secs: u64,
    /// Cap on concurrent place-detail fetches per search.
    pub max_concurrent_details: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Origin used when no position fix can be obtained.
    pub fallback_origin: Coordinate,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("directions_base_url", &self.directions_base_url)
            .field("geolocation_base_url", &self.geolocation_base_url)
            .field("search_radius_m", &self.search_radius_m)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_details", &self.max_concurrent_details)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("fallback_origin", &self.fallback_origin)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
