//! Session-scoped aggregation state: seen-identifier tracking, append-only
//! results, and the stale-response guard.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use nearplate_core::place::{OpenStatus, PlaceDetail, PlaceSummary, QueryCriteria};

/// Opaque identity of one aggregation session.
///
/// Detail responses carry the token of the session that scheduled them; a
/// token mismatch on ingest means the session was superseded while the fetch
/// was in flight and the response is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(Uuid);

/// Accumulates place details for the active search session.
///
/// Invariants:
/// - all identifiers in the result list are pairwise distinct (enforced by
///   [`ResultAggregator::admit`] scheduling each identifier at most once per
///   session);
/// - the seen-identifier set only grows within a session and is reset solely
///   by [`ResultAggregator::begin_session`];
/// - the result list is append-only within a session, so its natural order is
///   completion order — callers sort explicitly when order matters.
pub struct ResultAggregator {
    criteria: QueryCriteria,
    token: SessionToken,
    started_at: DateTime<Utc>,
    seen: HashSet<String>,
    results: Vec<PlaceDetail>,
    revision: watch::Sender<u64>,
}

impl ResultAggregator {
    /// Creates an aggregator with its first session already begun.
    #[must_use]
    pub fn new(criteria: QueryCriteria) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            criteria,
            token: SessionToken(Uuid::new_v4()),
            started_at: Utc::now(),
            seen: HashSet::new(),
            results: Vec::new(),
            revision,
        }
    }

    /// Starts a new session: clears the result list and the seen set, records
    /// `criteria` as active, and mints a fresh token.
    ///
    /// Must be called whenever the search category (or any other criterion)
    /// changes. In-flight detail fetches from the previous session are not
    /// cancelled; their results are rejected on arrival by the token check in
    /// [`ResultAggregator::ingest_detail`].
    pub fn begin_session(&mut self, criteria: QueryCriteria) -> SessionToken {
        self.criteria = criteria;
        self.token = SessionToken(Uuid::new_v4());
        self.started_at = Utc::now();
        self.seen.clear();
        self.results.clear();
        self.notify();
        tracing::debug!(category = %criteria.category, "aggregation session started");
        self.token
    }

    /// Admits search results into the session, returning only the summaries
    /// whose identifier has not been seen yet. Admitted identifiers are
    /// marked seen immediately, so a summary is returned at most once per
    /// session no matter how often it reappears in overlapping searches.
    ///
    /// The returned batch preserves input order; the caller schedules one
    /// detail fetch per entry.
    pub fn admit(&mut self, summaries: Vec<PlaceSummary>) -> Vec<PlaceSummary> {
        let mut fresh = Vec::new();
        for summary in summaries {
            if self.seen.contains(&summary.place_id) {
                tracing::debug!(place_id = %summary.place_id, "already seen — skipping");
                continue;
            }
            self.seen.insert(summary.place_id.clone());
            fresh.push(summary);
        }
        fresh
    }

    /// Ingests one completed detail fetch.
    ///
    /// Returns `false` without mutating anything when `token` belongs to a
    /// superseded session, or when the active criteria require open-now and
    /// the place reports itself closed (`Unknown` passes — absence of hours
    /// data is not evidence of closure). Otherwise appends the detail and
    /// fires the change notification so the presentation layer can re-render
    /// incrementally.
    pub fn ingest_detail(&mut self, token: SessionToken, detail: PlaceDetail) -> bool {
        if token != self.token {
            tracing::debug!(place_id = %detail.place_id, "discarding stale detail result");
            return false;
        }
        if self.criteria.open_now && detail.open == OpenStatus::Closed {
            tracing::debug!(place_id = %detail.place_id, "closed place dropped by open-now filter");
            return false;
        }

        self.results.push(detail);
        self.notify();
        true
    }

    /// Records a failed detail fetch. The identifier stays in the seen set,
    /// so the place is suppressed for the remainder of the session rather
    /// than re-fetched by the next overlapping search.
    pub fn mark_failed(&mut self, token: SessionToken, place_id: &str) {
        if token != self.token {
            return;
        }
        tracing::warn!(%place_id, "detail fetch failed — place omitted for this session");
    }

    /// The results accumulated so far, in completion order.
    #[must_use]
    pub fn results(&self) -> &[PlaceDetail] {
        &self.results
    }

    #[must_use]
    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Subscribes to the revision counter, bumped after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&mut self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

#[cfg(test)]
mod tests {
    use nearplate_core::category::Category;
    use nearplate_core::geo::Coordinate;

    use super::*;

    fn criteria(category: Category, open_now: bool) -> QueryCriteria {
        QueryCriteria {
            category,
            origin: Coordinate { lat: 0.0, lng: 0.0 },
            radius_m: 10_000,
            open_now,
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

    #[test]
    fn admit_is_idempotent_within_a_session() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));

        let first = agg.admit(vec![summary("a"), summary("b")]);
        assert_eq!(first.len(), 2);

        // Overlapping second batch: only the genuinely new id comes back.
        let second = agg.admit(vec![summary("b"), summary("c"), summary("a")]);
        let ids: Vec<&str> = second.iter().map(|s| s.place_id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn admit_preserves_input_order() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let admitted = agg.admit(vec![summary("z"), summary("a"), summary("m")]);
        let ids: Vec<&str> = admitted.iter().map(|s| s.place_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn begin_session_resets_seen_identifiers() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        agg.admit(vec![summary("a")]);

        agg.begin_session(criteria(Category::Cafe, false));
        let readmitted = agg.admit(vec![summary("a")]);
        assert_eq!(readmitted.len(), 1, "seen set must reset across sessions");
    }

    #[test]
    fn stale_detail_is_discarded() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let old_token = agg.token();
        agg.admit(vec![summary("a")]);

        // Category switch while the fetch for "a" is in flight.
        agg.begin_session(criteria(Category::Cafe, false));

        let accepted = agg.ingest_detail(old_token, detail("a", Some(4.5)));
        assert!(!accepted);
        assert!(agg.is_empty(), "stale result must never appear in the set");
    }

    #[test]
    fn ingest_appends_and_reports_acceptance() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let token = agg.token();
        agg.admit(vec![summary("a"), summary("b")]);

        assert!(agg.ingest_detail(token, detail("b", Some(4.9))));
        assert!(agg.ingest_detail(token, detail("a", Some(4.5))));

        // Completion order, not input order.
        let ids: Vec<&str> = agg.results().iter().map(|d| d.place_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn identifiers_stay_pairwise_distinct() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let token = agg.token();

        for batch in [vec![summary("a"), summary("b")], vec![summary("a")]] {
            for s in agg.admit(batch) {
                let id = s.place_id.clone();
                agg.ingest_detail(token, detail(&id, None));
            }
        }

        let mut ids: Vec<&str> = agg.results().iter().map(|d| d.place_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), agg.len(), "duplicate identifier in result set");
    }

    #[test]
    fn open_now_criteria_drops_closed_places() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, true));
        let token = agg.token();
        agg.admit(vec![summary("open"), summary("closed"), summary("unknown")]);

        let mut open = detail("open", None);
        open.open = OpenStatus::Open;
        let mut closed = detail("closed", None);
        closed.open = OpenStatus::Closed;
        let unknown = detail("unknown", None);

        assert!(agg.ingest_detail(token, open));
        assert!(!agg.ingest_detail(token, closed));
        assert!(agg.ingest_detail(token, unknown));

        let ids: Vec<&str> = agg.results().iter().map(|d| d.place_id.as_str()).collect();
        assert_eq!(ids, vec!["open", "unknown"]);
    }

    #[test]
    fn failed_fetch_stays_suppressed_for_the_session() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let token = agg.token();
        agg.admit(vec![summary("flaky")]);
        agg.mark_failed(token, "flaky");

        // The next overlapping search must not re-schedule it.
        let readmitted = agg.admit(vec![summary("flaky")]);
        assert!(readmitted.is_empty());
        assert!(agg.is_empty());
    }

    #[test]
    fn every_mutation_bumps_the_revision() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let rx = agg.subscribe();
        let token = agg.token();
        let base = *rx.borrow();

        agg.admit(vec![summary("a")]);
        agg.ingest_detail(token, detail("a", None));
        assert_eq!(*rx.borrow(), base + 1);

        agg.begin_session(criteria(Category::Cafe, false));
        assert_eq!(*rx.borrow(), base + 2);
    }

    #[test]
    fn rejected_ingest_does_not_notify() {
        let mut agg = ResultAggregator::new(criteria(Category::Restaurant, false));
        let rx = agg.subscribe();
        let stale = agg.token();
        agg.begin_session(criteria(Category::Cafe, false));
        let after_reset = *rx.borrow();

        agg.ingest_detail(stale, detail("a", None));
        assert_eq!(*rx.borrow(), after_reset);
    }
}
