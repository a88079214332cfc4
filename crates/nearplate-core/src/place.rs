//! Normalized place types shared by the search client and the aggregator.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::geo::Coordinate;

/// Whether a place reports itself as currently open.
///
/// Providers omit opening-hours data for many places, so absence is a real
/// state and must not collapse into `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

/// A place as returned by a nearby search: enough to identify and locate it,
/// not enough to render a full card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSummary {
    /// Provider-assigned identifier, stable across queries. The
    /// de-duplication key.
    pub place_id: String,
    pub name: String,
    pub location: Coordinate,
    /// Raw type tags from the provider (`restaurant`, `food`, ...).
    #[serde(default)]
    pub category_tags: Vec<String>,
}

/// Full detail for one place. Superset of [`PlaceSummary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub location: Coordinate,
    /// 0.0–5.0; absent when the place has no reviews yet.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    /// Photo references in provider order, possibly empty.
    #[serde(default)]
    pub photos: Vec<String>,
    /// Review texts in provider order, possibly empty.
    #[serde(default)]
    pub reviews: Vec<String>,
    pub open: OpenStatus,
}

/// One search session's parameters. Changing any of these starts a new
/// aggregation session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryCriteria {
    pub category: Category,
    pub origin: Coordinate,
    pub radius_m: u32,
    pub open_now: bool,
}
