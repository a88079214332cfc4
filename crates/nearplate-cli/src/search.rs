//! The `search` command: one aggregation session end to end.
//!
//! Origin resolution falls back from explicit flags to a geolocation fix to
//! the configured default coordinate; a geolocation failure is user-visible
//! but never fatal. Per-place detail failures are logged and the place is
//! omitted; only a search-level failure aborts the command.

use nearplate_agg::{filter_by_name, run_detail_fetches, sorted, ResultAggregator, SortKey};
use nearplate_core::app_config::AppConfig;
use nearplate_core::category::Category;
use nearplate_core::geo::Coordinate;
use nearplate_core::place::QueryCriteria;
use nearplate_places::PlacesClient;

use crate::render;

/// Resolve the search origin: explicit flags win, then a geolocation fix,
/// then the configured fallback coordinate (announced to the user).
pub(crate) async fn resolve_origin(
    client: &PlacesClient,
    config: &AppConfig,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Coordinate {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        return Coordinate { lat, lng };
    }
    match client.geolocate().await {
        Ok(fix) => fix,
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed — using fallback origin");
            eprintln!(
                "could not determine your position; searching near {:.3},{:.3}",
                config.fallback_origin.lat, config.fallback_origin.lng
            );
            config.fallback_origin
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn run(
    config: &AppConfig,
    category: Category,
    lat: Option<f64>,
    lng: Option<f64>,
    open_now: bool,
    sort: SortKey,
    filter: Option<&str>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let client = PlacesClient::new(config)?;
    let origin = resolve_origin(&client, config, lat, lng).await;

    let criteria = QueryCriteria {
        category,
        origin,
        radius_m: config.search_radius_m,
        open_now,
    };
    let mut agg = ResultAggregator::new(criteria);

    let summaries = client
        .nearby_search(origin, config.search_radius_m, category, open_now)
        .await?;
    if summaries.is_empty() {
        println!(
            "no {category} results within {} m of {:.4},{:.4}",
            config.search_radius_m, origin.lat, origin.lng
        );
        return Ok(());
    }

    let admitted = agg.admit(summaries);
    let scheduled = admitted.len();
    tracing::info!(scheduled, "fetching place details");

    // Incremental reveal: report each arrival while the fan-out drains.
    let mut revisions = agg.subscribe();
    let progress = tokio::spawn(async move {
        while revisions.changed().await.is_ok() {
            let revision = *revisions.borrow_and_update();
            tracing::debug!(revision, "result set updated");
        }
    });

    let accepted = run_detail_fetches(
        &mut agg,
        admitted,
        config.max_concurrent_details,
        |place_id| {
            let client = &client;
            async move { client.place_details(&place_id).await }
        },
    )
    .await;
    progress.abort();

    if accepted == 0 {
        anyhow::bail!("all {scheduled} detail fetches failed; nothing to show");
    }
    if accepted < scheduled {
        tracing::warn!(
            accepted,
            scheduled,
            "some places were omitted (failed fetches or open-now filter)"
        );
    }

    let mut view = sorted(agg.results(), sort, origin);
    if let Some(query) = filter {
        view = filter_by_name(query, &view);
    }
    if let Some(n) = limit {
        view.truncate(n);
    }

    if view.is_empty() {
        println!("no places match the current filter");
        return Ok(());
    }

    println!(
        "{} {category} result(s) near {:.4},{:.4} — {}",
        view.len(),
        origin.lat,
        origin.lng,
        agg.started_at().format("%H:%M:%S UTC")
    );
    for (index, place) in view.iter().enumerate() {
        println!("{}", render::card(index + 1, place, origin));
    }
    Ok(())
}
