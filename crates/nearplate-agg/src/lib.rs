//! Result aggregation for nearby-place searches.
//!
//! Turns the unordered, partially-overlapping, asynchronously-arriving stream
//! of search results and detail responses into one consistent, de-duplicated
//! collection. The aggregator is plain single-owner state: all mutation
//! happens on the driving task, and interleaved completions from a superseded
//! search are rejected by session-token comparison, not by locking.

pub mod fetch;
pub mod filter;
pub mod session;
pub mod sort;

pub use fetch::run_detail_fetches;
pub use filter::filter_by_name;
pub use session::{ResultAggregator, SessionToken};
pub use sort::{sorted, SortKey};
