//! `HotelScope` - hotel proximity dashboard core
//!
//! This library finds the points of interest around a hotel, compares nearby
//! activity across a region's hotel roster, and caches every remote tourism
//! lookup so revisiting a hotel or radius stays cheap.

pub mod cache;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod proximity;
pub mod roster;
pub mod tourism;

// Re-export core types for public API
pub use cache::{Clock, ManualClock, ResultCache, SystemClock};
pub use category::{CategoryInfo, OTHER_LODGING, classify};
pub use config::HotelScopeConfig;
pub use dashboard::{ComparisonView, HotelDashboard, HotelOverview, NearbyView};
pub use error::HotelScopeError;
pub use models::{ClassifiedPoi, Coordinate, Hotel, Poi, Region};
pub use proximity::{PoiFetcher, PoiLookup, ProximityAggregator, group_counts, nearest};
pub use roster::RosterLoader;
pub use tourism::{ProviderError, TourApiClient, TourismProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HotelScopeError>;
