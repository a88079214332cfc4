//! HTTP client for the places provider's REST endpoints.
//!
//! Wraps `reqwest` with provider-specific error handling, API key management,
//! and typed response deserialization. Every endpoint checks the `"status"`
//! field in the JSON envelope and surfaces API-level failures as
//! [`PlacesError::ApiStatus`]. Transient network errors are retried with
//! exponential back-off.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use nearplate_core::app_config::AppConfig;
use nearplate_core::category::Category;
use nearplate_core::geo::Coordinate;
use nearplate_core::place::{PlaceDetail, PlaceSummary};

use crate::error::PlacesError;
use crate::normalize::{normalize_detail, normalize_summary};
use crate::retry::retry_with_backoff;
use crate::types::{DetailsResponse, GeolocationResponse, NearbySearchResponse};

/// The detail fields requested from the provider. Asking for a fixed field
/// mask keeps responses small and billing predictable.
const DETAIL_FIELDS: &str = "place_id,name,geometry,rating,formatted_address,photos,reviews,opening_hours";

/// Client for the places, details, geolocation, and directions endpoints.
///
/// Construct with [`PlacesClient::new`] from an [`AppConfig`]; tests point the
/// base URLs at a wiremock server via the config's `*_base_url` fields.
pub struct PlacesClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) places_base: String,
    pub(crate) directions_base: String,
    geolocation_base: String,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key: config.places_api_key.clone(),
            places_base: config.places_base_url.clone(),
            directions_base: config.directions_base_url.clone(),
            geolocation_base: config.geolocation_base_url.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Searches for places of `category` within `radius_m` of `origin`.
    ///
    /// `ZERO_RESULTS` is success with an empty list. Entries the provider
    /// returns without an identifier or geometry are dropped during
    /// normalization.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any envelope status other than `OK`
    ///   or `ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: Category,
        open_now: bool,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let location = format!("{},{}", origin.lat, origin.lng);
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", category.as_place_type()),
        ];
        if open_now {
            params.push(("opennow", "true"));
        }

        let url = self.endpoint_url(&self.places_base, "nearbysearch/json", &params)?;
        let body: NearbySearchResponse = self
            .get_json(url, format!("nearbySearch(type={category})"))
            .await?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            _ => {
                return Err(PlacesError::ApiStatus {
                    status: body.status,
                    message: body.error_message,
                })
            }
        }

        Ok(body
            .results
            .into_iter()
            .filter_map(normalize_summary)
            .collect())
    }

    /// Fetches full place details by identifier.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is not `OK`.
    /// - [`PlacesError::Normalization`] if the response body lacks the fields
    ///   a renderable detail needs.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] as for search.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let params = [("place_id", place_id), ("fields", DETAIL_FIELDS)];
        let url = self.endpoint_url(&self.places_base, "details/json", &params)?;
        let body: DetailsResponse = self
            .get_json(url, format!("placeDetails(place_id={place_id})"))
            .await?;

        if body.status != "OK" {
            return Err(PlacesError::ApiStatus {
                status: body.status,
                message: body.error_message,
            });
        }

        let raw = body.result.ok_or_else(|| PlacesError::Normalization {
            place_id: place_id.to_owned(),
            reason: "OK details response carried no result object".to_owned(),
        })?;

        normalize_detail(raw)
    }

    /// Requests a one-shot best-effort position fix from the geolocation
    /// endpoint.
    ///
    /// Callers are expected to fall back to a configured default coordinate
    /// when this fails; there is no retry loop beyond the transient-error
    /// back-off shared by all endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or non-2xx status and
    /// [`PlacesError::Deserialize`] on an unexpected body.
    pub async fn geolocate(&self) -> Result<Coordinate, PlacesError> {
        let url = self.endpoint_url(&self.geolocation_base, "geolocate", &[])?;

        let fix: GeolocationResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                async move {
                    let response = self
                        .client
                        .post(url.clone())
                        .json(&serde_json::json!({ "considerIp": true }))
                        .send()
                        .await?;
                    let response = response.error_for_status()?;
                    let body = response.text().await?;
                    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                        context: "geolocate".to_owned(),
                        source: e,
                    })
                }
            })
            .await?;

        tracing::debug!(
            lat = fix.location.lat,
            lng = fix.location.lng,
            accuracy_m = fix.accuracy,
            "geolocation fix obtained"
        );

        Ok(Coordinate {
            lat: fix.location.lat,
            lng: fix.location.lng,
        })
    }

    /// Builds a full endpoint URL with the API key and properly
    /// percent-encoded query parameters.
    pub(crate) fn endpoint_url(
        &self,
        base: &str,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<Url, PlacesError> {
        let joined = format!("{}/{path}", base.trim_end_matches('/'));
        let mut url = Url::parse(&joined).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base.to_owned(),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request with retry, asserts a 2xx HTTP status, and parses
    /// the response body as JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: String,
    ) -> Result<T, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let context = context.clone();
            async move {
                let response = self.client.get(url).send().await?;
                let response = response.error_for_status()?;
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| PlacesError::Deserialize { context, source: e })
            }
        })
        .await
    }
}
