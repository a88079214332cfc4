//! Directions endpoint and external-navigation link building.
//!
//! Route computation is fully delegated to the provider; this module only
//! issues the request, maps failure statuses onto [`DirectionsError`], and
//! reduces the chosen route to a renderable [`RouteSummary`].

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use nearplate_core::geo::Coordinate;

use crate::client::PlacesClient;
use crate::error::{DirectionsError, PlacesError};
use crate::retry::retry_with_backoff;
use crate::types::DirectionsResponse;

/// The provider-computed route, reduced to what the card UI shows.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    /// Road-name summary of the route ("M1 and Princes Hwy").
    pub summary: String,
    /// Encoded overview polyline, ready to hand to a map renderer.
    pub polyline: String,
    pub distance_m: u64,
    pub duration_secs: u64,
}

impl PlacesClient {
    /// Requests a driving route from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Non-OK envelope statuses map to the matching [`DirectionsError`]
    /// variant (`ZERO_RESULTS` → [`DirectionsError::NoRoute`], `NOT_FOUND` →
    /// [`DirectionsError::GeocodeFailure`], and so on); network and
    /// deserialization failures map to [`DirectionsError::Http`] and
    /// [`DirectionsError::Deserialize`].
    pub async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteSummary, DirectionsError> {
        let from = format!("{},{}", origin.lat, origin.lng);
        let to = format!("{},{}", destination.lat, destination.lng);
        let params = [
            ("origin", from.as_str()),
            ("destination", to.as_str()),
            ("mode", "driving"),
        ];

        let url = self
            .endpoint_url(&self.directions_base, "json", &params)
            .map_err(|e| match e {
                PlacesError::InvalidBaseUrl { base_url, reason } => {
                    DirectionsError::InvalidBaseUrl { base_url, reason }
                }
                other => DirectionsError::Other(other.to_string()),
            })?;

        let body: DirectionsResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                async move {
                    let response = self.client.get(url).send().await?;
                    let response = response.error_for_status()?;
                    let text = response.text().await?;
                    serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                        context: "directions".to_owned(),
                        source: e,
                    })
                }
            })
            .await
            .map_err(|e| match e {
                PlacesError::Http(e) => DirectionsError::Http(e),
                PlacesError::Deserialize { context, source } => {
                    DirectionsError::Deserialize { context, source }
                }
                other => DirectionsError::Other(other.to_string()),
            })?;

        if body.status != "OK" {
            return Err(DirectionsError::from_status(&body.status, body.error_message));
        }

        // The provider occasionally returns OK with an empty routes array.
        let route = body.routes.into_iter().next().ok_or(DirectionsError::NoRoute)?;

        let distance_m = route.legs.iter().map(|l| l.distance.value).sum();
        let duration_secs = route.legs.iter().map(|l| l.duration.value).sum();

        Ok(RouteSummary {
            summary: route.summary,
            polyline: route.overview_polyline.points,
            distance_m,
            duration_secs,
        })
    }
}

/// Builds a deep link that opens turn-by-turn navigation to `destination` in
/// an external maps UI. The place identifier pins the link to the exact place
/// rather than whatever sits at the coordinate.
#[must_use]
pub fn navigation_url(destination: Coordinate, place_id: &str) -> String {
    let encoded = utf8_percent_encode(place_id, NON_ALPHANUMERIC);
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&destination_place_id={encoded}",
        destination.lat, destination.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_url_embeds_coordinate_and_place_id() {
        let url = navigation_url(
            Coordinate {
                lat: -33.8688,
                lng: 151.2093,
            },
            "ChIJabc123",
        );
        assert!(url.starts_with("https://www.google.com/maps/dir/?api=1"));
        assert!(url.contains("destination=-33.8688,151.2093"));
        assert!(url.contains("destination_place_id=ChIJabc123"));
    }

    #[test]
    fn navigation_url_percent_encodes_unsafe_place_ids() {
        let url = navigation_url(Coordinate { lat: 0.0, lng: 0.0 }, "id with spaces&=");
        assert!(
            url.contains("destination_place_id=id%20with%20spaces%26%3D"),
            "got: {url}"
        );
    }
}
