use thiserror::Error;

/// Errors returned by the places API client (search, details, geolocation).
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-OK status in its response envelope.
    #[error("places API status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A response entry could not be converted to the normalized domain model.
    #[error("normalization error for place {place_id}: {reason}")]
    Normalization { place_id: String, reason: String },

    /// A configured base URL could not be parsed.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Errors returned by the directions endpoint.
///
/// Each provider status maps to its own variant so callers can show a
/// status-specific message; [`DirectionsError::user_message`] provides the
/// wording.
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("no route could be found between the origin and destination")]
    NoRoute,

    #[error("origin or destination could not be geocoded")]
    GeocodeFailure,

    #[error("directions quota exceeded")]
    QuotaExceeded,

    #[error("directions request was denied: {}", .0.as_deref().unwrap_or("no detail"))]
    RequestDenied(Option<String>),

    #[error("directions request was invalid")]
    InvalidRequest,

    #[error("directions API status {0}")]
    Other(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DirectionsError {
    /// Maps a non-OK directions status string to the matching variant.
    pub(crate) fn from_status(status: &str, error_message: Option<String>) -> Self {
        match status {
            "ZERO_RESULTS" => DirectionsError::NoRoute,
            "NOT_FOUND" => DirectionsError::GeocodeFailure,
            "OVER_QUERY_LIMIT" => DirectionsError::QuotaExceeded,
            "REQUEST_DENIED" => DirectionsError::RequestDenied(error_message),
            "INVALID_REQUEST" => DirectionsError::InvalidRequest,
            other => DirectionsError::Other(other.to_owned()),
        }
    }

    /// The message to surface to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            DirectionsError::NoRoute => "No route could be found to that place.",
            DirectionsError::GeocodeFailure => {
                "The start or destination could not be located on the map."
            }
            DirectionsError::QuotaExceeded => {
                "The routing service is over its request quota. Try again later."
            }
            DirectionsError::RequestDenied(_) => "The routing service refused the request.",
            DirectionsError::InvalidRequest => "The routing request was malformed.",
            DirectionsError::Other(_) | DirectionsError::InvalidBaseUrl { .. } => {
                "Routing failed for an unexpected reason."
            }
            DirectionsError::Http(_) | DirectionsError::Deserialize { .. } => {
                "The routing service could not be reached."
            }
        }
    }
}
