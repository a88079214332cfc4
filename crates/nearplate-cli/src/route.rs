//! The `route` command: resolve the destination, ask the provider for a
//! driving route, and hand off to an external maps UI via deep link.

use nearplate_core::app_config::AppConfig;
use nearplate_places::{navigation_url, PlacesClient};

use crate::search::resolve_origin;

pub(crate) async fn run(
    config: &AppConfig,
    to: &str,
    lat: Option<f64>,
    lng: Option<f64>,
) -> anyhow::Result<()> {
    let client = PlacesClient::new(config)?;
    let origin = resolve_origin(&client, config, lat, lng).await;

    let destination = client.place_details(to).await?;

    match client.route(origin, destination.location).await {
        Ok(route) => {
            #[allow(clippy::cast_precision_loss)]
            let km = route.distance_m as f64 / 1000.0;
            println!(
                "route to {}: {km:.1} km, about {} min via {}",
                destination.name,
                route.duration_secs.div_ceil(60),
                route.summary
            );
            println!(
                "open in maps: {}",
                navigation_url(destination.location, &destination.place_id)
            );
            Ok(())
        }
        Err(e) => {
            // Raw error to the log, status-specific wording to the user.
            tracing::error!(error = %e, "routing failed");
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}
