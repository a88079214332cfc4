//! Normalization from raw wire types to the `nearplate_core` place model.
//!
//! Search entries missing their identifier or geometry are dropped (the
//! provider occasionally returns stubs for permanently closed places); a
//! detail response missing them is an error because the caller asked for that
//! specific place.

use nearplate_core::geo::Coordinate;
use nearplate_core::place::{OpenStatus, PlaceDetail, PlaceSummary};

use crate::error::PlacesError;
use crate::types::{RawOpeningHours, RawPlace};

/// Converts one search result into a [`PlaceSummary`], or `None` when the
/// entry lacks the fields needed to identify and place it.
#[must_use]
pub fn normalize_summary(raw: RawPlace) -> Option<PlaceSummary> {
    let place_id = raw.place_id?;
    let name = raw.name?;
    let geometry = match raw.geometry {
        Some(g) => g,
        None => {
            tracing::debug!(%place_id, "skipping search result without geometry");
            return None;
        }
    };

    Some(PlaceSummary {
        place_id,
        name,
        location: Coordinate {
            lat: geometry.location.lat,
            lng: geometry.location.lng,
        },
        category_tags: raw.types,
    })
}

/// Converts a details response into a [`PlaceDetail`].
///
/// # Errors
///
/// Returns [`PlacesError::Normalization`] if the identifier, name, or
/// geometry is missing.
pub fn normalize_detail(raw: RawPlace) -> Result<PlaceDetail, PlacesError> {
    let place_id = raw
        .place_id
        .ok_or_else(|| PlacesError::Normalization {
            place_id: "<unknown>".to_owned(),
            reason: "detail response has no place_id".to_owned(),
        })?;
    let name = raw.name.ok_or_else(|| PlacesError::Normalization {
        place_id: place_id.clone(),
        reason: "detail response has no name".to_owned(),
    })?;
    let geometry = raw.geometry.ok_or_else(|| PlacesError::Normalization {
        place_id: place_id.clone(),
        reason: "detail response has no geometry".to_owned(),
    })?;

    let open = open_status(raw.opening_hours.as_ref());

    // Detail responses carry formatted_address; search entries only vicinity.
    let address = raw.formatted_address.or(raw.vicinity);

    let photos = raw.photos.into_iter().map(|p| p.photo_reference).collect();
    let reviews = raw.reviews.into_iter().filter_map(|r| r.text).collect();

    Ok(PlaceDetail {
        place_id,
        name,
        location: Coordinate {
            lat: geometry.location.lat,
            lng: geometry.location.lng,
        },
        rating: raw.rating,
        address,
        photos,
        reviews,
        open,
    })
}

/// Maps the optional opening-hours fragment onto the tri-state model.
pub(crate) fn open_status(hours: Option<&RawOpeningHours>) -> OpenStatus {
    match hours.and_then(|h| h.open_now) {
        Some(true) => OpenStatus::Open,
        Some(false) => OpenStatus::Closed,
        None => OpenStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> RawPlace {
        serde_json::from_value(value).expect("raw place should deserialize")
    }

    #[test]
    fn summary_without_place_id_is_skipped() {
        let entry = raw(serde_json::json!({
            "name": "Ghost Diner",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
        }));
        assert!(normalize_summary(entry).is_none());
    }

    #[test]
    fn summary_without_geometry_is_skipped() {
        let entry = raw(serde_json::json!({
            "place_id": "p1",
            "name": "Floating Cafe"
        }));
        assert!(normalize_summary(entry).is_none());
    }

    #[test]
    fn summary_keeps_type_tags() {
        let entry = raw(serde_json::json!({
            "place_id": "p1",
            "name": "Corner Bar",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } },
            "types": ["bar", "point_of_interest"]
        }));
        let summary = normalize_summary(entry).expect("should normalize");
        assert_eq!(summary.category_tags, vec!["bar", "point_of_interest"]);
    }

    #[test]
    fn detail_missing_geometry_is_an_error() {
        let entry = raw(serde_json::json!({
            "place_id": "p2",
            "name": "Nowhere Noodles"
        }));
        let err = normalize_detail(entry).unwrap_err();
        assert!(
            matches!(err, PlacesError::Normalization { ref place_id, .. } if place_id == "p2"),
            "got: {err:?}"
        );
    }

    #[test]
    fn detail_prefers_formatted_address_over_vicinity() {
        let entry = raw(serde_json::json!({
            "place_id": "p3",
            "name": "Two Addresses",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } },
            "vicinity": "Near the park",
            "formatted_address": "1 Park St, Sydney NSW"
        }));
        let detail = normalize_detail(entry).unwrap();
        assert_eq!(detail.address.as_deref(), Some("1 Park St, Sydney NSW"));
    }

    #[test]
    fn detail_collects_photo_references_and_review_texts() {
        let entry = raw(serde_json::json!({
            "place_id": "p4",
            "name": "Snapshot Sushi",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } },
            "photos": [
                { "photo_reference": "ref-a", "height": 400, "width": 600 },
                { "photo_reference": "ref-b" }
            ],
            "reviews": [
                { "text": "Great rolls", "author_name": "A" },
                { "author_name": "B" },
                { "text": "Would return" }
            ]
        }));
        let detail = normalize_detail(entry).unwrap();
        assert_eq!(detail.photos, vec!["ref-a", "ref-b"]);
        assert_eq!(detail.reviews, vec!["Great rolls", "Would return"]);
    }

    #[test]
    fn open_status_is_tri_state() {
        let open = raw(serde_json::json!({
            "place_id": "p", "name": "n",
            "geometry": { "location": { "lat": 0.0, "lng": 0.0 } },
            "opening_hours": { "open_now": true }
        }));
        let closed = raw(serde_json::json!({
            "place_id": "p", "name": "n",
            "geometry": { "location": { "lat": 0.0, "lng": 0.0 } },
            "opening_hours": { "open_now": false }
        }));
        let unknown = raw(serde_json::json!({
            "place_id": "p", "name": "n",
            "geometry": { "location": { "lat": 0.0, "lng": 0.0 } }
        }));
        assert_eq!(normalize_detail(open).unwrap().open, OpenStatus::Open);
        assert_eq!(normalize_detail(closed).unwrap().open, OpenStatus::Closed);
        assert_eq!(normalize_detail(unknown).unwrap().open, OpenStatus::Unknown);
    }
}
