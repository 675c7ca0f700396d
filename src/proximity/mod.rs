//! Proximity module
//!
//! This module turns radius queries into dashboard metrics:
//! - Fail-soft POI fetching with per-record error skipping
//! - Cache keys for radius queries and whole-roster aggregates
//! - Nearby counts, nearest-N ranking and per-category breakdowns

pub mod aggregator;
pub mod fetcher;
pub mod keys;

pub use aggregator::{ProximityAggregator, RosterCounts, group_counts, nearest};
pub use fetcher::{PoiFetcher, PoiLookup};
pub use keys::{RosterKey, SearchKey};
