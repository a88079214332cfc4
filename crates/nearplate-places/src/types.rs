//! Places API response types.
//!
//! All types model the JSON structures returned by the provider's REST
//! endpoints. Every response carries a top-level `"status"` string; `"OK"`
//! (and `"ZERO_RESULTS"` for searches) indicates success and anything else is
//! surfaced as an API error by the client.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// nearbysearch
// ---------------------------------------------------------------------------

/// Envelope for the nearby-search endpoint: `{ "status": ..., "results": [...] }`.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single place entry as returned by search or details.
///
/// Search responses populate `vicinity`; detail responses populate
/// `formatted_address` and `reviews`. Everything except `place_id`, `name`,
/// and `geometry` is optional on the wire.
#[derive(Debug, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<RawOpeningHours>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    pub location: RawLatLng,
}

#[derive(Debug, Deserialize)]
pub struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Opening-hours fragment. `open_now` is itself optional — many places have
/// no hours data at all.
#[derive(Debug, Deserialize)]
pub struct RawOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

/// Envelope for the details endpoint: `{ "status": ..., "result": {...} }`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// directions
// ---------------------------------------------------------------------------

/// Envelope for the directions endpoint: `{ "status": ..., "routes": [...] }`.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub summary: String,
    pub overview_polyline: RawPolyline,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
pub struct RawPolyline {
    pub points: String,
}

#[derive(Debug, Deserialize)]
pub struct RawLeg {
    pub distance: RawValueText,
    pub duration: RawValueText,
}

/// The provider's `{ "value": 1234, "text": "1.2 km" }` pairs.
#[derive(Debug, Deserialize)]
pub struct RawValueText {
    pub value: u64,
    #[serde(default)]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// geolocation
// ---------------------------------------------------------------------------

/// Response of the geolocation endpoint: a best-effort position fix.
#[derive(Debug, Deserialize)]
pub struct GeolocationResponse {
    pub location: RawLatLng,
    #[serde(default)]
    pub accuracy: Option<f64>,
}
