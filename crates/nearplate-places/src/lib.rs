pub mod client;
pub mod directions;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::PlacesClient;
pub use directions::{navigation_url, RouteSummary};
pub use error::{DirectionsError, PlacesError};
