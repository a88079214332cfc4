//! Text-card rendering for place details.

use nearplate_core::geo::{distance_m, Coordinate};
use nearplate_core::place::{OpenStatus, PlaceDetail};

/// Shown when a place has no photos of its own.
const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/200";

/// Formats one result card.
pub(crate) fn card(index: usize, place: &PlaceDetail, origin: Coordinate) -> String {
    let rating = place
        .rating
        .map_or_else(|| "unrated".to_owned(), |r| format!("Rating: {r:.1}/5"));

    let open = match place.open {
        OpenStatus::Open => " · open now",
        OpenStatus::Closed => " · closed",
        OpenStatus::Unknown => "",
    };

    let reviews = if place.reviews.is_empty() {
        String::new()
    } else {
        format!(" · {} review(s)", place.reviews.len())
    };

    let address = place.address.as_deref().unwrap_or("address unknown");
    let photo = place
        .photos
        .first()
        .map_or(PLACEHOLDER_PHOTO, String::as_str);
    let km = distance_m(origin, place.location) / 1000.0;

    format!(
        "{index:>2}. {}\n    {address}\n    {rating}{open}{reviews} · {km:.1} km away\n    photo: {photo}",
        place.name
    )
}
