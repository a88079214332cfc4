//! Sort views over the aggregated result set.
//!
//! Sorting never mutates the aggregator's own order — the natural order stays
//! completion order and every consumer that cares asks for a sorted copy.

use std::str::FromStr;

use nearplate_core::geo::{distance_m, Coordinate};
use nearplate_core::place::PlaceDetail;

/// How the presentation layer wants the result set ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Leave completion order as-is.
    #[default]
    Unsorted,
    /// Highest rating first; places without a rating sort last.
    RatingDesc,
    /// Closest to the session origin first.
    DistanceAsc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "unsorted" => Ok(SortKey::Unsorted),
            "rating" => Ok(SortKey::RatingDesc),
            "distance" => Ok(SortKey::DistanceAsc),
            other => Err(format!(
                "unknown sort key '{other}' (expected one of: none, rating, distance)"
            )),
        }
    }
}

/// Returns a sorted copy of `results`. Both comparators are total (no NaN
/// traps from provider data) and the sort is stable, so entries that compare
/// equal keep their insertion order.
#[must_use]
pub fn sorted(results: &[PlaceDetail], key: SortKey, origin: Coordinate) -> Vec<PlaceDetail> {
    let mut out = results.to_vec();
    match key {
        SortKey::Unsorted => {}
        SortKey::RatingDesc => out.sort_by(|a, b| rating_of(b).total_cmp(&rating_of(a))),
        SortKey::DistanceAsc => out.sort_by(|a, b| {
            distance_m(origin, a.location).total_cmp(&distance_m(origin, b.location))
        }),
    }
    out
}

/// Missing ratings sort below every real rating (which is always >= 0).
fn rating_of(place: &PlaceDetail) -> f64 {
    place.rating.unwrap_or(-1.0)
}
