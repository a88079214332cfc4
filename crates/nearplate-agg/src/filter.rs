//! Free-text filtering over a rendered result set.

use nearplate_core::place::PlaceDetail;

/// Returns the places whose display name contains `query`, case-insensitively,
/// preserving the order of `source`. Pure function; an empty query matches
/// everything.
#[must_use]
pub fn filter_by_name(query: &str, source: &[PlaceDetail]) -> Vec<PlaceDetail> {
    let needle = query.to_lowercase();
    source
        .iter()
        .filter(|place| place.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
