//! Hotel roster entry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Coordinate;

/// A hotel from the regional roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub coordinate: Coordinate,
    /// Provider content id, the hotel's identity
    pub content_id: String,
    /// Nightly price in KRW
    pub price: u32,
    /// Rating between 3.0 and 5.0
    pub rating: f64,
    /// Nearby POI count for the radius it was computed with.
    /// Derived data, not part of the hotel's identity.
    pub tourist_count: Option<usize>,
}

impl Hotel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        content_id: impl Into<String>,
        price: u32,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            coordinate,
            content_id: content_id.into(),
            price,
            rating,
            tourist_count: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.content_id
    }

    /// Copy with `tourist_count` set
    #[must_use]
    pub fn with_tourist_count(mut self, count: usize) -> Self {
        self.tourist_count = Some(count);
        self
    }
}

/// Attach per-hotel counts from a roster aggregate; hotels missing from
/// `counts` get zero.
pub fn apply_tourist_counts(hotels: &mut [Hotel], counts: &HashMap<String, usize>) {
    for hotel in hotels {
        hotel.tourist_count = Some(counts.get(hotel.id()).copied().unwrap_or(0));
    }
}
