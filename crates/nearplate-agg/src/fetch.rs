//! Bounded fan-out of per-place detail fetches.
//!
//! One detail request per admitted summary, at most `max_concurrent` in
//! flight. Completions are ingested as they land, so the presentation layer
//! sees results appear incrementally rather than in one batch at the end.

use std::fmt::Display;
use std::future::Future;

use futures::stream::{self, StreamExt};

use nearplate_core::place::{PlaceDetail, PlaceSummary};

use crate::session::ResultAggregator;

/// Drives detail fetches for an admitted batch to completion.
///
/// `fetch` is called once per summary with the place identifier; its failures
/// are logged and routed to [`ResultAggregator::mark_failed`] (the place is
/// omitted, nothing else is blocked). Returns the number of details the
/// aggregator accepted.
///
/// Scheduling follows the batch order but completion order is unconstrained;
/// the session-token check inside the aggregator is what keeps a batch from a
/// superseded session out of the result set.
pub async fn run_detail_fetches<F, Fut, E>(
    agg: &mut ResultAggregator,
    admitted: Vec<PlaceSummary>,
    max_concurrent: usize,
    fetch: F,
) -> usize
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<PlaceDetail, E>>,
    E: Display,
{
    let token = agg.token();

    let mut completions = stream::iter(admitted)
        .map(|summary| {
            let fut = fetch(summary.place_id.clone());
            async move { (summary, fut.await) }
        })
        .buffer_unordered(max_concurrent.max(1));

    let mut accepted = 0usize;
    while let Some((summary, outcome)) = completions.next().await {
        match outcome {
            Ok(detail) => {
                if agg.ingest_detail(token, detail) {
                    accepted += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    place_id = %summary.place_id,
                    error = %e,
                    "detail fetch failed — omitting place"
                );
                agg.mark_failed(token, &summary.place_id);
            }
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use nearplate_core::category::Category;
    use nearplate_core::geo::Coordinate;
    use nearplate_core::place::{OpenStatus, QueryCriteria};

    use crate::sort::{sorted, SortKey};

    use super::*;

    fn criteria() -> QueryCriteria {
        QueryCriteria {
            category: Category::Restaurant,
            origin: Coordinate { lat: 0.0, lng: 0.0 },
            radius_m: 10_000,
            open_now: false,
        }
    }

    fn summary(id: &str) -> PlaceSummary {
        PlaceSummary {
            place_id: id.to_owned(),
            name: format!("Place {id}"),
            location: Coordinate { lat: 0.0, lng: 0.0 },
            category_tags: vec![],
        }
    }

    fn detail(id: &str, rating: Option<f64>) -> PlaceDetail {
        PlaceDetail {
            place_id: id.to_owned(),
            name: format!("Place {id}"),
            location: Coordinate { lat: 0.0, lng: 0.0 },
            rating,
            address: None,
            photos: vec![],
            reviews: vec![],
            open: OpenStatus::Unknown,
        }
    }

    #[tokio::test]
    async fn fetches_every_admitted_place_exactly_once() {
        let mut agg = ResultAggregator::new(criteria());
        let admitted = agg.admit(vec![summary("a"), summary("b"), summary("c")]);

        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let accepted = run_detail_fetches(&mut agg, admitted, 4, move |id| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(detail(&id, Some(4.0)))
            }
        })
        .await;

        assert_eq!(accepted, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(agg.len(), 3);
    }

    #[tokio::test]
    async fn out_of_order_completion_still_sorts_correctly() {
        let mut agg = ResultAggregator::new(criteria());
        let admitted = agg.admit(vec![summary("a"), summary("b")]);

        // "a" completes after "b" despite being scheduled first.
        run_detail_fetches(&mut agg, admitted, 2, |id| async move {
            if id == "a" {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok::<_, String>(detail("a", Some(4.5)))
            } else {
                Ok(detail("b", Some(4.9)))
            }
        })
        .await;

        let natural: Vec<&str> = agg.results().iter().map(|d| d.place_id.as_str()).collect();
        assert_eq!(natural, vec!["b", "a"], "natural order is completion order");

        let by_rating = sorted(agg.results(), SortKey::RatingDesc, agg.criteria().origin);
        let ids: Vec<&str> = by_rating.iter().map(|d| d.place_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn failed_fetch_is_omitted_without_blocking_others() {
        let mut agg = ResultAggregator::new(criteria());
        let admitted = agg.admit(vec![summary("good"), summary("bad"), summary("fine")]);

        let accepted = run_detail_fetches(&mut agg, admitted, 2, |id| async move {
            if id == "bad" {
                Err("upstream said no".to_owned())
            } else {
                Ok(detail(&id, None))
            }
        })
        .await;

        assert_eq!(accepted, 2);
        let ids: Vec<&str> = agg.results().iter().map(|d| d.place_id.as_str()).collect();
        assert!(!ids.contains(&"bad"));

        // Still suppressed: a repeat search does not re-admit the failure.
        assert!(agg.admit(vec![summary("bad")]).is_empty());
    }

    #[tokio::test]
    async fn concurrency_stays_within_the_cap() {
        let mut agg = ResultAggregator::new(criteria());
        let admitted = agg.admit((0..12).map(|i| summary(&format!("p{i}"))).collect());

        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (a, p) = (Arc::clone(&active), Arc::clone(&peak));

        run_detail_fetches(&mut agg, admitted, 3, move |id| {
            let (a, p) = (Arc::clone(&a), Arc::clone(&p));
            async move {
                let now = a.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                a.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(detail(&id, None))
            }
        })
        .await;

        assert_eq!(agg.len(), 12);
        assert!(
            peak.load(Ordering::SeqCst) <= 3,
            "peak in-flight {} exceeded cap",
            peak.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn zero_cap_still_makes_progress() {
        let mut agg = ResultAggregator::new(criteria());
        let admitted = agg.admit(vec![summary("a")]);
        let accepted =
            run_detail_fetches(&mut agg, admitted, 0, |id| async move {
                Ok::<_, String>(detail(&id, None))
            })
            .await;
        assert_eq!(accepted, 1);
    }
}
